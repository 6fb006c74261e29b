//! Rust names for catalog names.

use std::collections::BTreeSet;

use convert_case::{Case, Casing};
use proc_macro2::{Ident, Span};

/// Keywords that cannot be raw identifiers.
const RESERVED: [&str; 4] = ["self", "Self", "super", "crate"];

/// An identifier for a converted name.
///
/// Characters that cannot appear in an identifier become `_`, a leading digit gets a `_`
/// prefix, a name with nothing but underscores becomes `placeholder`, and keywords are
/// raw or suffixed with `_`.
fn ident(name: &str, placeholder: &str) -> Ident {
    let mut name: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if name.trim_start_matches('_').is_empty() {
        name = placeholder.to_string();
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    if syn::parse_str::<Ident>(&name).is_ok() {
        Ident::new(&name, Span::call_site())
    } else if RESERVED.contains(&name.as_str()) {
        Ident::new(&format!("{name}_"), Span::call_site())
    } else {
        Ident::new_raw(&name, Span::call_site())
    }
}

/// `createdAt` -> `CREATED_AT`
pub(crate) fn constant(name: &str) -> Ident {
    ident(&name.to_case(Case::UpperSnake), "FIELD_")
}

/// `BlogPost` -> `blog_post`
pub(crate) fn snake(name: &str) -> Ident {
    ident(&name.to_case(Case::Snake), "field_")
}

/// `blog_post` -> `BlogPost`
pub(crate) fn pascal(name: &str) -> Ident {
    ident(&name.to_case(Case::Pascal), "Type_")
}

/// The identifiers declared in one Rust scope.
///
/// Distinct catalog names can convert to the same identifier (`createdAt` and
/// `created_at`); later ones get a numeric suffix.
#[derive(Debug, Default)]
pub(crate) struct Scope {
    taken: BTreeSet<String>,
}

impl Scope {
    pub(crate) fn claim(&mut self, ident: Ident) -> Ident {
        let name = ident.to_string();
        if self.taken.insert(name.clone()) {
            return ident;
        }

        let base = name.trim_start_matches("r#");
        let unique = (2..)
            .map(|n| Ident::new(&format!("{base}_{n}"), Span::call_site()))
            .find(|candidate| !self.taken.contains(&candidate.to_string()))
            .unwrap_or(ident);
        self.taken.insert(unique.to_string());
        unique
    }
}
