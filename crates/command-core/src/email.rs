//! Best-effort normalization of spoken recipient phrases into addresses.

/// Providers recognized when a spoken domain arrives without its TLD.
pub const KNOWN_PROVIDERS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "icloud.com",
];

/// Turns phrases like "john doe at gmail" into "johndoe@gmail.com".
///
/// This is a heuristic normalizer, not a validator, and it is idempotent:
/// feeding an already-normalized address back in returns it unchanged.
#[derive(Debug, Clone)]
pub struct AddressNormalizer {
    default_domain: String,
}

impl AddressNormalizer {
    pub fn new(default_domain: impl Into<String>) -> Self {
        Self {
            default_domain: default_domain.into(),
        }
    }

    /// Rules applied in order, first applicable rule wins:
    /// 1. well-formed address: strip spaces from the local part only;
    /// 2. spoken " at " with no "@": split local/domain, fold spoken " dot ",
    ///    complete a dot-less domain against the known providers else append
    ///    ".com";
    /// 3. spoken " dot ": replace with "." and re-evaluate;
    /// 4. "@" with a dot-less domain: same provider completion as rule 2;
    /// 5. bare phrase: strip spaces and append the default domain.
    pub fn normalize(&self, raw: &str) -> String {
        let raw = raw.trim().to_lowercase();

        if let Some((local, domain)) = raw.split_once('@') {
            if domain.contains('.') {
                return format!("{}@{}", squash(local), domain.trim());
            }
        }

        if !raw.contains('@') {
            if let Some((local, domain)) = raw.split_once(" at ") {
                let domain = squash(&domain.replace(" dot ", "."));
                let domain = if domain.contains('.') {
                    domain
                } else {
                    complete_domain(&domain)
                };
                return format!("{}@{}", squash(local), domain);
            }
        }

        if raw.contains(" dot ") {
            return self.normalize(&raw.replace(" dot ", "."));
        }

        if let Some((local, domain)) = raw.split_once('@') {
            return format!("{}@{}", squash(local), complete_domain(domain.trim()));
        }

        format!("{}@{}", squash(&raw), self.default_domain)
    }
}

fn squash(s: &str) -> String {
    s.split_whitespace().collect()
}

fn complete_domain(fragment: &str) -> String {
    KNOWN_PROVIDERS
        .iter()
        .find(|p| p.contains(fragment))
        .map(|p| p.to_string())
        .unwrap_or_else(|| format!("{fragment}.com"))
}
