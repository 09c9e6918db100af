use urlencoding::encode;

use super::{
    location::IpInfoLocation,
    provider::{HttpProvider, Provider},
};
use crate::config::LookupConfig;

const BASE_URL: &str = "https://ipinfo.io";

pub struct IpInfo<'a> {
    token: &'a str,
}

impl<'a> IpInfo<'a> {
    pub fn new(token: &'a str) -> Self {
        Self { token }
    }

    pub fn from_config(config: &'a LookupConfig) -> Self {
        Self::new(config.api_key())
    }
}

impl HttpProvider for IpInfo<'_> {
    type Record = IpInfoLocation;

    const PROVIDER: Provider = Provider::IpInfo;

    fn request_url(&self, target: &str) -> String {
        format!(
            "{}/{}/json?token={}",
            BASE_URL,
            encode(target),
            encode(self.token)
        )
    }
}
