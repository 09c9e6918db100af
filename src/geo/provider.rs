use std::{fmt, str::FromStr};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{http_client::HttpResponse, location::Location};
use crate::Error;

/// Statuses treated as a successful answer.
const SUCCESS: [u16; 2] = [200, 201];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Test,
    FreeGeoIp,
    IpStack,
    IpInfo,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Test,
        Provider::FreeGeoIp,
        Provider::IpStack,
        Provider::IpInfo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Test => "test",
            Provider::FreeGeoIp => "freegeoip",
            Provider::IpStack => "ipstack",
            Provider::IpInfo => "ipinfo",
        }
    }

    /// Resolves the configured provider name.
    pub fn from_config(provider: Option<&str>) -> Result<Self, Error> {
        match provider {
            Some(name) => name.parse(),
            None => Err(Error::provider_not_configured()),
        }
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.name() == s)
            .ok_or_else(|| Error::unknown_provider(s))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A geolocation API reached over HTTP.
pub trait HttpProvider: Send + Sync {
    type Record: DeserializeOwned + Into<Location>;

    const PROVIDER: Provider;

    fn request_url(&self, target: &str) -> String;

    /// Rejects bodies that decode but describe a failure.
    fn check(&self, _object: &Map<String, Value>) -> Result<(), Error> {
        Ok(())
    }

    fn parse(&self, response: HttpResponse) -> Result<Location, Error> {
        let object = decode_object(response)?;
        self.check(&object)?;
        let record: Self::Record = serde_json::from_value(Value::Object(object))?;
        Ok(record.into())
    }
}

/// Accepts a success status carrying a JSON object.
pub fn decode_object(response: HttpResponse) -> Result<Map<String, Value>, Error> {
    let HttpResponse { status, body } = response;
    if !SUCCESS.contains(&status) {
        return Err(Error::Status { status, body });
    }

    match serde_json::from_str(&body)? {
        Value::Object(object) => Ok(object),
        _ => Err(Error::unexpected_body(body)),
    }
}
