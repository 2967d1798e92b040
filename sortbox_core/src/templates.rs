//! HTML rendering for the listing page.

use std::sync::Arc;

use anyhow::Context as _;
use tera::{Context, Tera};

use crate::error::Result;
use crate::files::FileEntry;

const INDEX_TEMPLATE: &str = "index.html";

/// Tera instance with the embedded page templates registered.
#[derive(Clone)]
pub struct PageRenderer {
    tera: Arc<Tera>,
}

impl PageRenderer {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))
            .context("failed to register index template")?;

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render_index(&self, app_name: &str, files: &[FileEntry]) -> Result<String> {
        let mut context = Context::new();
        context.insert("app_name", app_name);
        context.insert("files", files);

        Ok(self.tera.render(INDEX_TEMPLATE, &context)?)
    }
}
