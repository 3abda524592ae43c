//! Entity type indicators used by format C UENs.
//!
//! Format C numbers are issued by agencies other than ACRA. The two characters
//! following the year (`LL` in `T09LL0001B`) identify the kind of entity.

/// Code -> description, sorted by code.
pub const ENTITY_TYPES: &[(&str, &str)] = &[
    ("CC", "Charity and Charitable Trust"),
    ("CD", "Clinic (Dental)"),
    ("CH", "Chamber of Commerce"),
    ("CL", "Clinical Laboratory"),
    ("CM", "Cemetery"),
    ("CP", "Construction Professional Practice"),
    ("CS", "Co-operative Society"),
    ("CX", "Clinic (Medical)"),
    ("DP", "Design Practice"),
    ("FB", "Foreign Bank"),
    ("FC", "Foreign Company"),
    ("FM", "Foreign Military Agency"),
    ("FN", "Foreign Non-Profit Organisation"),
    ("GA", "Government Agency"),
    ("GB", "Government Body"),
    ("GS", "Government and Grant-Aided School"),
    ("HS", "Hospital"),
    ("LL", "Limited Liability Partnership"),
    ("LP", "Limited Partnership"),
    ("MB", "Mutual Benefit Organisation"),
    ("MC", "Management Corporation"),
    ("MD", "Medical Centre"),
    ("MH", "Maternity Home"),
    ("MM", "Madrasah"),
    ("MQ", "Mosque"),
    ("NB", "News Bureau"),
    ("NR", "Non-Registered Entity"),
    ("PA", "Pawnbroker"),
    ("PB", "Professional Body"),
    ("PF", "Public Accounting Firm"),
    ("RF", "Representative Office"),
    ("RP", "Registered Political Party"),
    ("SM", "Society (Mutual Aid)"),
    ("SS", "Private School"),
    ("TC", "Town Council"),
    ("TU", "Trade Union"),
    ("UL", "Unit Trust"),
    ("VH", "Veterinary Clinic"),
    ("VS", "Voluntary Welfare Society"),
    ("WF", "Welfare Fund"),
];

/// Look up the description for a two-letter entity type code.
///
/// The lookup is case-insensitive; unknown codes return `None`.
pub fn entity_type(code: &str) -> Option<&'static str> {
    let code = code.trim();
    ENTITY_TYPES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, description)| *description)
}

/// Whether `c` is the first letter of any known entity type code.
pub fn is_entity_type_initial(c: char) -> bool {
    ENTITY_TYPES.iter().any(|(code, _)| code.starts_with(c))
}
