//! Host label exclusion lists for news URLs
//!
//! Labels are upper case because the corpus stores URLs upper-cased.

/// Generic top-level domains
pub const TOP_LEVEL_DOMAINS: &[&str] = &[
    "COM", "NET", "ORG", "GOV", "EDU", "EN", "ENG", "OR", "NETWORK",
];

/// Country-code and regional top-level domains
// Source: https://www.worldstandards.eu/other/tlds/ (April 2023)
pub const COUNTRY_DOMAINS: &[&str] = &[
    "ABUDHABI", "AF", "AX", "AL", "DZ", "AS", "AD", "AO", "AI", "AQ", "AG", "AR",
    "AM", "AW", "AC", "AU", "AT", "AZ", "BS", "BH", "BD", "BB", "EUS", "BY",
    "BE", "BZ", "BJ", "BM", "BT", "BO", "BQ", "AN", "NL", "BA", "BW", "BV",
    "BR", "IO", "VG", "BN", "BG", "BF", "MM", "BI", "KH", "CM", "CA", "CV",
    "CAT", "KY", "CF", "TD", "CL", "CN", "CX", "CC", "CO", "KM", "CD", "CG",
    "CK", "CR", "CI", "HR", "CU", "CW", "CY", "NC", "TR", "CZ", "DK", "DJ",
    "DM", "DO", "AE", "TL", "TP", "EC", "EG", "SV", "UK", "GQ", "ER", "EE",
    "ET", "EU", "FO", "FK", "FJ", "FI", "FR", "GF", "PF", "TF", "GA", "GAL",
    "GM", "PS", "GE", "DE", "GH", "GI", "GB", "GR", "GL", "GD", "GP", "GU",
    "GT", "GG", "GN", "GW", "GY", "HT", "HM", "HN", "HK", "HU", "IS", "IN",
    "ID", "IR", "IQ", "IE", "IM", "IL", "IT", "JM", "JP", "JE", "JO", "KZ",
    "KE", "KI", "KP", "KR", "KW", "KG", "LA", "LV", "LB", "LS", "LR", "LY",
    "LI", "LT", "LU", "MO", "MK", "MG", "MW", "MY", "MV", "ML", "MT", "MH",
    "MQ", "MR", "MU", "YT", "MX", "FM", "MD", "MC", "MN", "ME", "MS", "MA",
    "MZ", "NA", "NR", "NP", "NZ", "NI", "NE", "NG", "NU", "NF", "MP", "NO",
    "OM", "PK", "PW", "PA", "PG", "PY", "PE", "PH", "PN", "PL", "PT", "PR",
    "QA", "RE", "RO", "RU", "RW", "BL", "SH", "KN", "LC", "MF", "VC", "PM",
    "WS", "SM", "ST", "SA", "SN", "RS", "SC", "SL", "SG", "SX", "SK", "SI",
    "SB", "SO", "ZA", "GS", "SS", "ES", "LK", "SD", "SR", "SJ", "SZ", "SE",
    "CH", "SY", "TW", "TJ", "TZ", "TH", "TG", "TK", "TO", "TT", "TN", "TM",
    "TC", "TV", "UG", "UA", "US", "VI", "UY", "UZ", "VU", "VA", "VE", "VN",
    "WF", "EH", "YE", "ZM", "ZW",
];

/// Section and edition labels that precede the publisher's name
pub const SUBDOMAINS: &[&str] = &[
    "WWW3", "NEWS", "ENGLISH", "OPINION", "BUSINESS", "LEGACY", "ENTERTAINMENT",
    "LIFESTYLE", "POP", "NEWSINFO", "GLOBALNATION", "CEBUDAILYNEWS", "RADYO", "USA",
    "INTERAKSYON", "GLOBAL", "ENG", "INTERNATIONAL", "FINANCE", "ASIA", "TECHNOLOGY",
    "HOME", "EUROPE", "GO", "ECONOMICTIMES", "TIMESOFINDIA", "BLOGSPOT", "GATE",
    "FRENCH", "EDITION", "NOTICES", "ARTICLE", "BETA",
];

/// Whether a host label carries no publisher information
pub fn is_excluded_label(label: &str) -> bool {
    TOP_LEVEL_DOMAINS.contains(&label)
        || COUNTRY_DOMAINS.contains(&label)
        || SUBDOMAINS.contains(&label)
}
