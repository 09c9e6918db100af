use serde_json::{Map, Value};
use urlencoding::encode;

use super::{
    location::IpStackLocation,
    provider::{HttpProvider, Provider},
};
use crate::{Error, config::LookupConfig};

const BASE_URL: &str = "http://api.ipstack.com";

pub struct IpStack<'a> {
    access_key: &'a str,
}

impl<'a> IpStack<'a> {
    pub fn new(access_key: &'a str) -> Self {
        Self { access_key }
    }

    pub fn from_config(config: &'a LookupConfig) -> Self {
        Self::new(config.api_key())
    }
}

impl HttpProvider for IpStack<'_> {
    type Record = IpStackLocation;

    const PROVIDER: Provider = Provider::IpStack;

    fn request_url(&self, target: &str) -> String {
        format!(
            "{}/{}?access_key={}",
            BASE_URL,
            encode(target),
            encode(self.access_key)
        )
    }

    /// ipstack answers 200 with `{"success": false, "error": {..}}` on bad keys and quotas.
    fn check(&self, object: &Map<String, Value>) -> Result<(), Error> {
        if object.get("success").and_then(Value::as_bool) != Some(false) {
            return Ok(());
        }

        let error = object.get("error");
        let reason = error
            .and_then(|e| e.get("info"))
            .or_else(|| error.and_then(|e| e.get("type")))
            .and_then(Value::as_str)
            .unwrap_or("request was not successful");
        Err(Error::Provider {
            provider: Self::PROVIDER.name(),
            reason: reason.to_string(),
        })
    }
}
