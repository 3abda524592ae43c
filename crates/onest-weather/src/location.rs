//! Known forecast areas and lenient location matching.

/// Areas used when no forecast has been fetched yet, or the upstream omits
/// `area_metadata`.
pub const KNOWN_LOCATIONS: [&str; 34] = [
    "Ang Mo Kio",
    "Bedok",
    "Bishan",
    "Boon Lay",
    "Bukit Batok",
    "Bukit Merah",
    "Bukit Panjang",
    "Bukit Timah",
    "Central Water Catchment",
    "Changi",
    "Choa Chu Kang",
    "City",
    "Clementi",
    "Geylang",
    "Hougang",
    "Jalan Bahar",
    "Jurong East",
    "Jurong Island",
    "Jurong West",
    "Kallang",
    "Lim Chu Kang",
    "Mandai",
    "Marine Parade",
    "Novena",
    "Pasir Ris",
    "Paya Lebar",
    "Pioneer",
    "Pulau Tekong",
    "Pulau Ubin",
    "Punggol",
    "Queenstown",
    "Seletar",
    "Sembawang",
    "Sengkang",
];

/// Whether `candidate` plausibly names one of `known`.
///
/// Valid when the candidate contains a known name or a known name contains
/// the candidate, ignoring case. Deliberately lenient: short fragments such
/// as "ba" match several areas.
pub fn matches_known_location<S: AsRef<str>>(candidate: Option<&str>, known: &[S]) -> bool {
    let Some(candidate) = candidate.map(str::trim).filter(|c| !c.is_empty()) else {
        return false;
    };
    let candidate = candidate.to_lowercase();

    known.iter().any(|name| {
        let name = name.as_ref().to_lowercase();
        candidate.contains(&name) || name.contains(&candidate)
    })
}
