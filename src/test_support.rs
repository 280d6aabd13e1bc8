//! Fixtures and fakes shared by unit tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::PropertyRecord;
use crate::utils::PageSource;

/// The record `detail_html()` parses into, for the given id.
pub(crate) fn sample_record(id: u64) -> PropertyRecord {
    PropertyRecord {
        id,
        url: format!("https://www.imoveiscuritiba.com.br/propriedades/-{id}.html"),
        features: BTreeMap::from([
            ("Quartos".to_string(), "3".to_string()),
            ("Área útil".to_string(), "90 m²".to_string()),
        ]),
        address: "Rua XV de Novembro, 100".to_string(),
        neighborhood: "Centro".to_string(),
        city: "Curitiba".to_string(),
        operation: "Venda".to_string(),
        price: "R$ 450.000".to_string(),
        description: "Apartamento amplo.".to_string(),
    }
}

pub(crate) fn detail_html() -> String {
    r#"<html><body>
        <h2 class="title-location"><b>Rua XV de Novembro, 100</b> <span>Centro,  , Curitiba</span></h2>
        <ul class="features">
            <li class="icon-feature"><span>Quartos</span> <b>3</b></li>
            <li class="icon-feature"><span>Área útil</span> <b>90 m²</b></li>
        </ul>
        <div class="price-operation">Venda</div>
        <div class="price-items"><span>R$ 450.000</span></div>
        <div id="verDatosDescripcion">Apartamento amplo.</div>
    </body></html>"#
        .to_string()
}

pub(crate) fn listing_html(ids: &[u64], next: Option<&str>) -> String {
    let items: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<li><a class="dl-aviso-a" href="/propriedades/apartamento-{id}.html">Apto {id}</a></li>"#
            )
        })
        .collect();
    let pagination = next
        .map(|href| {
            format!(r#"<ul><li class="pagination-action-next"><a href="{href}">Próxima</a></li></ul>"#)
        })
        .unwrap_or_default();

    format!("<html><body><ul>{items}</ul>{pagination}</body></html>")
}

/// `PageSource` serving canned responses and counting every fetch.
/// Unknown URLs fail as transport errors.
#[derive(Default)]
pub(crate) struct ScriptedPages {
    pages: HashMap<String, std::result::Result<String, String>>,
    fetches: AtomicUsize,
}

impl ScriptedPages {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), Ok(html.into()));
        self
    }

    pub(crate) fn with_failure(mut self, url: &str, message: &str) -> Self {
        self.pages.insert(url.to_string(), Err(message.to_string()));
        self
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for ScriptedPages {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(message)) => Err(AppError::transport(message)),
            None => Err(AppError::transport(format!("no page scripted for {url}"))),
        }
    }
}
