//! Navigator page parsing.
//!
//! The page nests one row per entry inside each service's
//! `div.extracted-list`. A row's first element says what it is:
//!
//! - `extracted-folder`: the folder name is the first `div` inside it, and
//!   the row's remaining elements are the folder's own rows.
//! - `file-leaf`: the file name is its first child.

use exn::{OptionExt, ResultExt};
use scraper::{ElementRef, Html};
use tracing::instrument;

use crate::consts::{EXTRACTED_LIST_SELECTOR, FILE_CLASS, FOLDER_CLASS, SERVICE_NAME_SELECTOR, SERVICE_SELECTOR};
use crate::error::{ErrorKind, Result};
use crate::models::{Entry, Listing, Service};

impl Listing {
    /// # Errors
    /// - [`ErrorKind::InvalidDocument`] if the page lists no services.
    /// - [`ErrorKind::MissingField`] if a service or folder has no name.
    /// - [`ErrorKind::MalformedListing`] for rows of an unknown kind, or
    ///   names that aren't a single path component.
    #[instrument(skip(html), fields(html_size = html.len()))]
    pub fn parse(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let services = document.select(&SERVICE_SELECTOR).map(service).collect::<Result<Vec<_>>>()?;
        if services.is_empty() {
            exn::bail!(ErrorKind::InvalidDocument);
        }
        tracing::debug!(services = services.len(), "Parsed navigator page");
        Ok(Self { services })
    }
}

#[instrument(level = "trace", skip(element))]
fn service(element: ElementRef<'_>) -> Result<Service> {
    let name = element
        .select(&SERVICE_NAME_SELECTOR)
        .next()
        .map(text)
        .filter(|name| !name.is_empty())
        .ok_or_raise(|| ErrorKind::MissingField("service name"))?;
    let name = component(name)?;
    let entries = match element.select(&EXTRACTED_LIST_SELECTOR).next() {
        Some(list) => list.child_elements().map(entry).collect::<Result<Vec<_>>>(),
        None => Ok(Vec::new()),
    };
    let entries = entries.or_raise(|| ErrorKind::MalformedListing(format!("in service {name}")))?;
    Ok(Service { name, entries })
}

fn entry(row: ElementRef<'_>) -> Result<Entry> {
    let mut elements = row.child_elements();
    let head = elements.next().ok_or_raise(|| ErrorKind::MalformedListing("empty row".to_string()))?;
    match head.value().classes().next() {
        Some(FOLDER_CLASS) => {
            // The head is a `div` itself, so skip it when looking for the name.
            let name = head
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "div")
                .map(text)
                .filter(|name| !name.is_empty())
                .ok_or_raise(|| ErrorKind::MissingField("folder name"))?;
            let name = component(name)?;
            let children = elements.map(entry).collect::<Result<Vec<_>>>();
            let children = children.or_raise(|| ErrorKind::MalformedListing(format!("in folder {name}")))?;
            Ok(Entry::Folder { name, children })
        },
        Some(FILE_CLASS) => {
            let name = head
                .first_child()
                .map(|node| match ElementRef::wrap(node) {
                    Some(el) => text(el),
                    None => node.value().as_text().map(|t| t.trim().to_string()).unwrap_or_default(),
                })
                .filter(|name| !name.is_empty())
                .ok_or_raise(|| ErrorKind::MissingField("file name"))?;
            Ok(Entry::File { name: component(name)? })
        },
        other => exn::bail!(ErrorKind::MalformedListing(format!("unknown row type {:?}", other.unwrap_or("")))),
    }
}

fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Names end up joined onto the export root, so they must not escape it.
fn component(name: String) -> Result<String> {
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        exn::bail!(ErrorKind::MalformedListing(format!("invalid entry name {name:?}")));
    }
    Ok(name)
}
