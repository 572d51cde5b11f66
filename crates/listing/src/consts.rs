use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

pub(crate) const FOLDER_CLASS: &str = "extracted-folder";
pub(crate) const FILE_CLASS: &str = "file-leaf";

selector!(SERVICE_SELECTOR, "div.service-detail");
selector!(SERVICE_NAME_SELECTOR, ".service_name > h1");
selector!(EXTRACTED_LIST_SELECTOR, "div.extracted-list");
