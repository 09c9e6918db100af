//! Geolocation lookups against pluggable providers.
//!
//! A [`Locator`] owns the lookup configuration and a [`Transport`]. Every call to
//! [`Locator::lookup`] normalizes the identifier, short-circuits loopback addresses,
//! resolves the configured [`Provider`] and performs at most one GET.

use std::time::Duration;

mod cache;
mod freegeoip;
mod http_client;
mod ipinfo;
mod ipstack;
mod location;
mod provider;
mod stub;
mod target;

pub use crate::Error;
use crate::config::LookupConfig;

pub use cache::LocationCache;
pub use freegeoip::FreeGeoIp;
pub use http_client::{HttpClient, HttpResponse, Transport};
pub use ipinfo::IpInfo;
pub use ipstack::IpStack;
pub use location::{
    FreeGeoIpLocation, IpInfoLocation, IpStackConnection, IpStackCurrency, IpStackGeo,
    IpStackLanguage, IpStackLocation, IpStackTimeZone, LOOPBACK_IP, Location, LoopbackLocation,
    TestRecord,
};
pub use provider::{HttpProvider, Provider, decode_object};
pub use target::{Identifier, RequestContext, Target, normalize};

pub struct Locator<T = HttpClient> {
    config: LookupConfig,
    transport: T,
    cache: Option<LocationCache>,
}

impl Locator<HttpClient> {
    pub fn new(config: LookupConfig) -> Result<Self, Error> {
        let transport = HttpClient::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Locator<T> {
    pub fn with_transport(config: LookupConfig, transport: T) -> Self {
        let cache = LocationCache::from_config(&config);
        Self {
            config,
            transport,
            cache,
        }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Looks up a hostname, IP address or request context.
    ///
    /// Returns `Ok(None)` only from the test provider when nothing matches. An unset or
    /// unknown provider fails with [`Error::Configuration`] before any request is sent.
    pub async fn lookup(&self, identifier: impl Into<Identifier>) -> Result<Option<Location>, Error> {
        let target = match normalize(identifier.into()) {
            Target::Loopback => {
                debug!("loopback target, skipping provider");
                return Ok(Some(Location::loopback()));
            }
            Target::Remote(target) => target,
        };

        let provider = Provider::from_config(self.config.provider.as_deref())?;
        debug!("lookup {} via {}", target, provider);

        match provider {
            Provider::Test => Ok(stub::lookup(&self.config, &target)),
            Provider::FreeGeoIp => {
                let handler = FreeGeoIp::from_config(&self.config);
                self.fetch(&handler, &target).await.map(Some)
            }
            Provider::IpStack => {
                let handler = IpStack::from_config(&self.config);
                self.fetch(&handler, &target).await.map(Some)
            }
            Provider::IpInfo => {
                let handler = IpInfo::from_config(&self.config);
                self.fetch(&handler, &target).await.map(Some)
            }
        }
    }

    async fn fetch<P>(&self, handler: &P, target: &str) -> Result<Location, Error>
    where
        P: HttpProvider,
    {
        let provider = P::PROVIDER;
        if let Some(cache) = &self.cache {
            if let Some(location) = cache.get(provider, target).await {
                debug!("cache hit for {} via {}", target, provider);
                return Ok(location);
            }
        }

        let url = handler.request_url(target);
        let response = self.transport.get(&url).await?;
        let location = handler.parse(response).map_err(|err| {
            warn!("{} lookup for {} failed: {}", provider, target, err);
            err
        })?;

        if let Some(cache) = &self.cache {
            cache.insert(provider, target, location.clone()).await;
        }
        Ok(location)
    }
}
