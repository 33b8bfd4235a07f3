use crate::models::person::Person;
use crate::models::roster::Roster;

/// Visible subset of `roster` for a search query.
///
/// Matches name, identifier and (staff only) designation, case-insensitive.
/// A blank query returns the whole roster. Roster order is preserved.
pub fn filter<'a>(roster: &'a Roster, query: &str) -> Vec<&'a Person> {
    let needle = query.trim().to_lowercase();
    roster
        .iter()
        .filter(|p| needle.is_empty() || matches(p, &needle))
        .collect()
}

/// `needle` must already be lowercase.
pub(crate) fn matches(person: &Person, needle: &str) -> bool {
    person.display_name.to_lowercase().contains(needle)
        || person.identifier.to_lowercase().contains(needle)
        || person
            .designation()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}
