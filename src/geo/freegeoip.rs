use urlencoding::encode;

use super::{
    location::FreeGeoIpLocation,
    provider::{HttpProvider, Provider},
};
use crate::config::LookupConfig;

pub struct FreeGeoIp<'a> {
    url: &'a str,
}

impl<'a> FreeGeoIp<'a> {
    pub fn new(url: &'a str) -> Self {
        Self {
            url: url.trim_end_matches('/'),
        }
    }

    pub fn from_config(config: &'a LookupConfig) -> Self {
        Self::new(&config.url)
    }
}

impl HttpProvider for FreeGeoIp<'_> {
    type Record = FreeGeoIpLocation;

    const PROVIDER: Provider = Provider::FreeGeoIp;

    fn request_url(&self, target: &str) -> String {
        format!("{}/json/{}", self.url, encode(target))
    }
}
