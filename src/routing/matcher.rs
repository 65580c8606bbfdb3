//! Route matching module
//!
//! Matches a request method and path against a table of path templates.
//! A template is a `/`-separated list of literal segments plus one `{title}`
//! capture; a path matches only with the same number of segments, equal
//! literals (case-sensitive) and a capture that is a valid page title.
//! Percent escapes are decoded before matching, so `/view/%41bc` is `Abc`.

use hyper::Method;
use percent_encoding::percent_decode_str;

use crate::wiki::Title;

const TITLE_CAPTURE: &str = "{title}";

/// Wiki operation selected by a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    View,
    Edit,
    Save,
}

/// Methods a route can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethod {
    /// `GET`, and `HEAD` by extension
    Get,
    Post,
}

impl RouteMethod {
    fn accepts(self, method: &Method) -> bool {
        match self {
            Self::Get => method == Method::GET || method == Method::HEAD,
            Self::Post => method == Method::POST,
        }
    }
}

/// One entry of the routing table
#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    pub method: RouteMethod,
    pub template: &'static str,
    pub operation: Operation,
}

/// Result of a successful match; the title is already validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub operation: Operation,
    pub title: Title,
}

pub const WIKI_ROUTES: &[RouteRule] = &[
    RouteRule {
        method: RouteMethod::Get,
        template: "/view/{title}",
        operation: Operation::View,
    },
    RouteRule {
        method: RouteMethod::Get,
        template: "/edit/{title}",
        operation: Operation::Edit,
    },
    RouteRule {
        method: RouteMethod::Post,
        template: "/save/{title}",
        operation: Operation::Save,
    },
];

/// Find the first rule matching the method and percent-decoded path
pub fn match_route(method: &Method, path: &str, rules: &[RouteRule]) -> Option<RouteMatch> {
    let path = percent_decode_str(path).decode_utf8().ok()?;
    rules
        .iter()
        .filter(|rule| rule.method.accepts(method))
        .find_map(|rule| {
            let title = match_template(rule.template, &path)?;
            Some(RouteMatch {
                operation: rule.operation,
                title,
            })
        })
}

/// Match a path against a template, returning the captured title
pub fn match_template(template: &str, path: &str) -> Option<Title> {
    let path = path.strip_prefix('/')?;
    let template = template.strip_prefix('/')?;

    let mut captured = None;
    let mut path_segments = path.split('/');
    for expected in template.split('/') {
        let segment = path_segments.next()?;
        if expected == TITLE_CAPTURE {
            captured = Some(Title::parse(segment).ok()?);
        } else if segment != expected {
            return None;
        }
    }

    // Trailing segments such as `/view/foo/bar` or `/view/foo/`
    if path_segments.next().is_some() {
        return None;
    }

    captured
}
