#![allow(dead_code)]

use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex},
};

use ipgeo::{
    Error, LookupConfig,
    geo::{HttpResponse, Locator, Transport},
};

/// Replays queued responses and records every requested url.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, String>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(&self, reason: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, Error> {
        self.requests.lock().unwrap().push(url.to_string());
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(io::Error::new(io::ErrorKind::ConnectionRefused, reason).into()),
            None => panic!("unexpected request to {url}"),
        }
    }
}

pub fn locator(config: LookupConfig) -> (Locator<MockTransport>, MockTransport) {
    let transport = MockTransport::default();
    (Locator::with_transport(config, transport.clone()), transport)
}

pub const FREEGEOIP: &str = r#"{
    "ip": "192.30.253.113",
    "country_code": "US",
    "country_name": "United States",
    "region_code": "CA",
    "region_name": "California",
    "city": "San Francisco",
    "zip_code": "94107",
    "time_zone": "America/Los_Angeles",
    "latitude": 37.7697,
    "longitude": -122.3933,
    "metro_code": 807
}"#;

pub const IPSTACK: &str = r#"{
    "ip": "192.30.253.113",
    "type": "ipv4",
    "continent_code": "NA",
    "continent_name": "North America",
    "country_code": "US",
    "country_name": "United States",
    "region_code": "CA",
    "region_name": "California",
    "city": "San Francisco",
    "zip": "94107",
    "latitude": 37.7697,
    "longitude": -122.3933,
    "location": {
        "geoname_id": 5391959,
        "capital": "Washington D.C.",
        "languages": [
            {"code": "en", "name": "English", "native": "English"}
        ],
        "country_flag": "https://assets.ipstack.com/flags/us.svg",
        "calling_code": "1",
        "is_eu": false
    },
    "time_zone": {
        "id": "America/Los_Angeles",
        "current_time": "2019-04-09T04:23:51-07:00",
        "gmt_offset": -25200,
        "code": "PDT",
        "is_daylight_saving": true
    },
    "currency": {
        "code": "USD",
        "name": "US Dollar",
        "plural": "US dollars",
        "symbol": "$",
        "symbol_native": "$"
    },
    "connection": {
        "asn": 36459,
        "isp": "GitHub, Inc."
    }
}"#;

pub const IPINFO: &str = r#"{
    "ip": "192.30.253.113",
    "hostname": "lb-192-30-253-113-sea.github.com",
    "city": "San Francisco",
    "region": "California",
    "country": "US",
    "loc": "37.7697,-122.3933",
    "org": "AS36459 GitHub, Inc.",
    "phone": "415"
}"#;
