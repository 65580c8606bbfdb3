//! Page rendering
//!
//! Templates are parsed once at startup and shared read-only by every request.

use std::fmt;
use std::path::Path;

use tera::{Context, Tera};

use super::page::Page;

const BUILTIN_VIEW: &str = include_str!("../../templates/view.html");
const BUILTIN_EDIT: &str = include_str!("../../templates/edit.html");

/// The two pages the wiki knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTemplate {
    View,
    Edit,
}

impl PageTemplate {
    pub const ALL: [Self; 2] = [Self::View, Self::Edit];

    pub const fn name(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }

    /// Template file name; the `.html` suffix turns on autoescaping
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::View => "view.html",
            Self::Edit => "edit.html",
        }
    }
}

impl fmt::Display for PageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Templates compiled into the binary
    pub fn builtin() -> Result<Self, tera::Error> {
        Self::from_sources(BUILTIN_VIEW, BUILTIN_EDIT)
    }

    pub fn from_sources(view: &str, edit: &str) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (PageTemplate::View.file_name(), view),
            (PageTemplate::Edit.file_name(), edit),
        ])?;
        Ok(Self { tera })
    }

    /// Load `view.html` and `edit.html` from a directory
    pub fn from_dir(dir: &Path) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        let files: Vec<_> = PageTemplate::ALL
            .iter()
            .map(|t| (dir.join(t.file_name()), Some(t.file_name())))
            .collect();
        tera.add_template_files(files)?;
        Ok(Self { tera })
    }

    /// Load from `dir` when given, otherwise fall back to the built-in set
    pub fn load(dir: Option<&str>) -> Result<Self, tera::Error> {
        match dir {
            Some(dir) => Self::from_dir(Path::new(dir)),
            None => Self::builtin(),
        }
    }

    pub fn render(&self, template: PageTemplate, page: &Page) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("title", page.title.as_str());
        context.insert("body", &String::from_utf8_lossy(&page.body));
        self.tera.render(template.file_name(), &context)
    }
}

/// Flatten an error and its sources into one line for a response body
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
