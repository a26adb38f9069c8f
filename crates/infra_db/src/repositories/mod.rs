//! Repository implementations for domain entities
//!
//! Each repository encapsulates the SQL for one aggregate, maps between
//! database rows and domain types, and implements the corresponding storage
//! port so the API layer can be wired against either PostgreSQL or the
//! in-memory adapters.

pub mod counter;
pub mod invoice;
pub mod product;
pub mod user;
pub mod setting;

pub use counter::CounterRepository;
pub use invoice::InvoiceRepository;
pub use product::ProductRepository;
pub use user::UserRepository;
pub use setting::SettingsRepository;

/// Escapes `LIKE`/`ILIKE` metacharacters so caller input matches literally.
///
/// The filter contract is a plain substring match; without this, `%`, `_`
/// and `\` in a query would act as wildcards in the SQL rendition while the
/// in-memory rendition treats them as ordinary characters. Queries using the
/// escaped value must carry `ESCAPE '\'`.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
