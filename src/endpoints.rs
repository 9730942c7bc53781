//! Kounta API paths, relative to the configured base URL.

use std::fmt::Display;

use reqwest::Url;

use crate::errors::KountaResult;

pub const TOKEN: &str = "v1/token.json";
pub const COMPANY_ME: &str = "v1/companies/me";

pub fn sites(company: impl Display) -> String {
    format!("v1/companies/{}/sites", company)
}

pub fn staff(company: impl Display) -> String {
    format!("v1/companies/{}/staff", company)
}

pub fn categories(company: impl Display) -> String {
    format!("v1/companies/{}/categories", company)
}

pub fn category_products(company: impl Display, category: impl Display) -> String {
    format!("v1/companies/{}/categories/{}/products", company, category)
}

pub fn webhooks(company: impl Display) -> String {
    format!("v1/companies/{}/webhooks.json", company)
}

pub fn webhook(company: impl Display, id: impl Display) -> String {
    format!("v1/companies/{}/webhooks/{}.json", company, id)
}

pub fn pending_orders(company: impl Display, site: impl Display) -> String {
    format!("v1/companies/{}/sites/{}/orders/pending.json", company, site)
}

pub fn complete_orders(company: impl Display, site: impl Display) -> String {
    format!("v1/companies/{}/sites/{}/orders/complete.json", company, site)
}

pub fn order(company: impl Display, id: impl Display) -> String {
    format!("v1/companies/{}/orders/{}.json", company, id)
}

/// Join `path` onto `base`, replacing whatever path `base` carries.
pub fn resolve(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    url
}

/// Parse the absolute base URL from configuration.
pub fn parse_base(base: &str) -> KountaResult<Url> {
    Ok(Url::parse(base)?)
}
