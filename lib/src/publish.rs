//! Signing and publishing of nanopubs.
//!
//! [`Publisher`] is the seam the driver talks to. [`NanopubClient`] implements it with a
//! local RSA profile and a nanopub server reached over blocking HTTP.

use crate::consts::{CREATED, CREATOR};
use crate::errors::PublishError;
use crate::mapper::Statement;
use crate::nanopub::{self, Nanopub, SignedNanopub};
use crate::profile::Profile;
use anyhow::Result;
use chrono::prelude::*;
use log::info;
use oxigraph::model::vocab::xsd;
use oxigraph::model::Literal;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "https://np.petapico.org/";

/// What a nanopub server returns for a published nanopub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedInfo {
    pub nanopub_uri: String,
}

pub trait Publisher {
    /// Wraps a statement into an unsigned nanopub.
    fn create_publication(&self, statement: &Statement) -> Nanopub {
        Nanopub::from_statement(statement)
    }
    /// Signs locally without contacting any server.
    fn sign(&mut self, nanopub: &Nanopub) -> Result<SignedNanopub>;
    /// Signs and publishes, returning the published identifier.
    fn publish(&mut self, nanopub: &Nanopub) -> Result<PublishedInfo>;
}

pub struct NanopubClient {
    profile: Profile,
    server_url: String,
    http: Client,
}

impl NanopubClient {
    pub fn new(profile: Profile, server_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            profile,
            server_url: server_url.into(),
            http,
        })
    }
}

impl Publisher for NanopubClient {
    /// Stamps the creation time and the profile's ORCID into the publication info.
    fn create_publication(&self, statement: &Statement) -> Nanopub {
        let mut np = Nanopub::from_statement(statement);
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let created = Literal::new_typed_literal(now, xsd::DATE_TIME);
        np.add_pubinfo(CREATED, created.as_ref());
        np.add_pubinfo(CREATOR, self.profile.orcid().as_ref());
        np
    }

    fn sign(&mut self, nanopub: &Nanopub) -> Result<SignedNanopub> {
        nanopub::sign(nanopub, &self.profile)
    }

    fn publish(&mut self, nanopub: &Nanopub) -> Result<PublishedInfo> {
        let signed = self.sign(nanopub)?;
        let body = signed.trig().to_string();
        info!("Publishing {} to {}", signed.uri(), self.server_url);
        let resp = self
            .http
            .post(&self.server_url)
            .header(CONTENT_TYPE, "application/trig")
            .body(body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PublishError {
                server: self.server_url.clone(),
                status: status.as_u16(),
                body: resp.text().unwrap_or_default(),
            }
            .into());
        }
        Ok(PublishedInfo {
            nanopub_uri: signed.uri().as_str().to_string(),
        })
    }
}
