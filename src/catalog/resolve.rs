/// Shortcut aliases for commonly requested spacecraft. Each alias maps to
/// candidate substrings tried in order against the catalog.
const ALIASES: &[(&str, &[&str])] = &[
    (
        "ISS",
        &["ISS (ZARYA)", "INTERNATIONAL SPACE STATION", "ISS"],
    ),
    ("HUBBLE", &["HST", "HUBBLE SPACE TELESCOPE"]),
    ("TIANGONG", &["TIANGONG", "CSS (TIANHE)"]),
];

/// Resolves a user-supplied name against the catalog's names.
///
/// Matching is case-insensitive on the trimmed query, in three stages:
/// exact name, alias candidates (each candidate scanned against every name
/// before the next candidate is tried), then substring. Ties go to the
/// first name in catalog order.
pub fn resolve_name<'a>(query: &str, names: &[&'a str]) -> Option<&'a str> {
    let query = query.trim().to_uppercase();

    for name in names {
        if name.to_uppercase() == query {
            return Some(name);
        }
    }

    for (alias, candidates) in ALIASES {
        if query == *alias {
            for candidate in *candidates {
                for name in names {
                    if name.to_uppercase().contains(candidate) {
                        return Some(name);
                    }
                }
            }
        }
    }

    for name in names {
        if name.to_uppercase().contains(&query) {
            return Some(name);
        }
    }

    None
}
