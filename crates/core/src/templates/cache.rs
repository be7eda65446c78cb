//! Template cache construction and lookup.
//!
//! Layout expected under the html directory:
//!
//! ```text
//! base.tmpl.html
//! partials/*.tmpl.html
//! pages/*.tmpl.html
//! ```
//!
//! Every page gets its own engine instance holding the base layout, all
//! partials and the page itself, keyed by the page's file name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use super::{TemplateData, helpers};
use crate::Error;

pub const BASE_TEMPLATE: &str = "base.tmpl.html";
pub const TEMPLATE_SUFFIX_GLOB: &str = "*.tmpl.html";

/// A render-ready page: the page template plus the layout and partials it uses.
#[derive(Debug)]
pub struct TemplateSet {
    name: String,
    tera: Tera,
}

impl TemplateSet {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the page with the given context.
    ///
    /// Values are HTML-escaped by the engine since every template ends in `.html`.
    pub fn render(&self, data: &TemplateData) -> Result<String, Error> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(&self.name, &context)?)
    }
}

/// Immutable map from page name to [`TemplateSet`].
#[derive(Debug, Default)]
pub struct TemplateCache {
    sets: HashMap<String, TemplateSet>,
}

impl TemplateCache {
    /// Parse every page under `html_dir/pages`.
    ///
    /// # Errors
    ///
    /// Fails on the first template that cannot be read or parsed; no partial
    /// cache is returned.
    pub fn new(html_dir: impl AsRef<Path>) -> Result<Self, Error> {
        let html_dir = html_dir.as_ref();
        let base = html_dir.join(BASE_TEMPLATE);
        let partials = glob_templates(html_dir, "partials")?;
        let pages = glob_templates(html_dir, "pages")?;

        if pages.is_empty() {
            tracing::warn!(dir = %html_dir.display(), "no page templates found");
        }

        let mut sets = HashMap::with_capacity(pages.len());
        for page in &pages {
            let name = file_name(page)?;

            let mut tera = Tera::default();
            helpers::register(&mut tera);

            let mut files: Vec<(&Path, Option<&str>)> = Vec::with_capacity(partials.len() + 2);
            files.push((base.as_path(), Some(BASE_TEMPLATE)));
            for partial in &partials {
                files.push((partial.as_path(), Some(file_name(partial)?)));
            }
            files.push((page.as_path(), Some(name)));

            tera.add_template_files(files)?;

            tracing::debug!(page = name, partials = partials.len(), "parsed template set");
            sets.insert(name.to_string(), TemplateSet { name: name.to_string(), tera });
        }

        Ok(Self { sets })
    }

    /// Look up the template set for a page.
    pub fn get(&self, page: &str) -> Result<&TemplateSet, Error> {
        self.sets
            .get(page)
            .ok_or_else(|| Error::UnknownPage(page.to_string()))
    }

    /// Look up a page and render it in one step.
    pub fn render(&self, page: &str, data: &TemplateData) -> Result<String, Error> {
        self.get(page)?.render(data)
    }

    /// Page names in sorted order.
    pub fn pages(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Sorted list of `<html_dir>/<sub>/*.tmpl.html`.
fn glob_templates(html_dir: &Path, sub: &str) -> Result<Vec<PathBuf>, Error> {
    let dir = html_dir.join(sub);
    let dir = dir
        .to_str()
        .ok_or_else(|| Error::TemplatePattern(format!("non UTF-8 template directory: {}", dir.display())))?;
    let pattern = format!("{}/{TEMPLATE_SUFFIX_GLOB}", glob::Pattern::escape(dir));

    let mut paths = glob::glob(&pattern)?.collect::<Result<Vec<_>, _>>()?;
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> Result<&str, Error> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::TemplatePattern(format!("invalid template file name: {}", path.display())))
}
