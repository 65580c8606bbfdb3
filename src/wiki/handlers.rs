//! View, edit and save handlers
//!
//! Every handler receives a title that the router has already validated, so
//! none of them look at the raw request path.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::page::{Page, Title};
use super::store::PageStore;
use super::templates::{error_chain, PageTemplate, Templates};
use crate::http;
use crate::logger;

/// The operations the request adapter dispatches to
#[allow(async_fn_in_trait)]
pub trait WikiHandlers {
    /// Show a page, or redirect to its edit form when it can't be loaded
    async fn view(&self, title: Title, is_head: bool) -> Response<Full<Bytes>>;

    /// Show the edit form, empty for a page that doesn't exist yet
    async fn edit(&self, title: Title, is_head: bool) -> Response<Full<Bytes>>;

    /// Persist the submitted page text byte for byte and redirect to the page
    async fn save(&self, title: Title, body: Vec<u8>) -> Response<Full<Bytes>>;
}

pub fn view_path(title: &Title) -> String {
    format!("/view/{title}")
}

pub fn edit_path(title: &Title) -> String {
    format!("/edit/{title}")
}

/// Wiki backed by a page store and a template set
pub struct Wiki {
    store: PageStore,
    templates: Templates,
}

impl Wiki {
    pub const fn new(store: PageStore, templates: Templates) -> Self {
        Self { store, templates }
    }

    fn render(&self, template: PageTemplate, page: &Page, is_head: bool) -> Response<Full<Bytes>> {
        match self.templates.render(template, page) {
            Ok(html) => http::build_html_response(html, is_head),
            Err(e) => {
                let message = error_chain(&e);
                logger::log_error(&format!("Rendering {template} for {}: {message}", page.title));
                http::build_500_response(message)
            }
        }
    }
}

impl WikiHandlers for Wiki {
    async fn view(&self, title: Title, is_head: bool) -> Response<Full<Bytes>> {
        match self.store.load(&title).await {
            Ok(page) => self.render(PageTemplate::View, &page, is_head),
            Err(e) => {
                // Any load failure sends the reader to the edit form, but only
                // a missing file is expected.
                if !e.is_not_found() {
                    logger::log_warning(&format!("Loading {title} for view: {e}"));
                }
                http::build_redirect_response(&edit_path(&title))
            }
        }
    }

    async fn edit(&self, title: Title, is_head: bool) -> Response<Full<Bytes>> {
        let page = match self.store.load(&title).await {
            Ok(page) => page,
            Err(e) => {
                logger::log_debug(&format!("Editing new page {title}: {e}"));
                Page::empty(title)
            }
        };
        self.render(PageTemplate::Edit, &page, is_head)
    }

    async fn save(&self, title: Title, body: Vec<u8>) -> Response<Full<Bytes>> {
        let page = Page::new(title, body);

        match self.store.save(&page).await {
            Ok(()) => {
                logger::log_page_saved(page.title.as_str(), page.body.len());
                http::build_redirect_response(&view_path(&page.title))
            }
            Err(e) => {
                let message = error_chain(&e);
                logger::log_error(&format!("Saving {}: {message}", page.title));
                http::build_500_response(message)
            }
        }
    }
}
