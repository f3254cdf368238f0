//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module    | TOML Section | Purpose                                  |
//! |-----------|--------------|------------------------------------------|
//! | `site`    | `[site]`     | Public URL and not-found route           |
//! | `content` | `[content]`  | JSON data tree, database, content types  |
//! | `suggest` | `[suggest]`  | 404 suggestion limits                    |
//! | `serve`   | `[serve]`    | Development server                       |
//! | `dupes`   | `[dupes]`    | Consistency report output                |

mod content;
mod dupes;
mod serve;
mod site;
mod suggest;

pub use content::ContentConfig;
pub use dupes::DupesConfig;
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
pub use suggest::SuggestConfig;
