//! Educational features: what each command does and what the records mean.

use colored::Colorize;
use domcheck::{dmarc_name, RecordType};

/// Command explanation builder.
pub struct Explain {
    title: String,
    description: String,
    requests: Vec<String>,
    what_happens: Vec<String>,
    learn_more: Option<String>,
}

impl Explain {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            requests: Vec::new(),
            what_happens: Vec::new(),
            learn_more: None,
        }
    }

    fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    fn request(mut self, request: &str) -> Self {
        self.requests.push(request.to_string());
        self
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn rfc(mut self, number: u32) -> Self {
        self.learn_more = Some(format!("https://www.rfc-editor.org/rfc/rfc{number}"));
        self
    }

    /// Print the explanation to stderr so it never mixes with machine-readable output.
    pub fn print(&self) {
        eprintln!();
        eprintln!("{}", format!("=== {} ===", self.title).bold().cyan());
        eprintln!("{}", self.description);
        eprintln!();

        if !self.what_happens.is_empty() {
            eprintln!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, step);
            }
            eprintln!();
        }

        if !self.requests.is_empty() {
            eprintln!("{}", "Requests:".bold());
            for request in &self.requests {
                eprintln!("  {}", request.dimmed());
            }
        }

        if let Some(url) = &self.learn_more {
            eprintln!();
            eprintln!("{} {}", "Learn more:".bold(), url.cyan().underline());
        }

        eprintln!();
        eprintln!("{}", "=== Results ===".bold().cyan());
        eprintln!();
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn extract() -> Self {
        Self::new("Extract Domains")
            .description("Finds every domain-like token in the input text. Nothing is sent over the network.")
            .step("Scans for dot-separated labels of letters, digits and hyphens")
            .step("Labels are 1-63 characters and cannot start or end with a hyphen")
            .step("The last label needs at least two characters")
            .step("Matches are lowercased, deduplicated and sorted")
            .rfc(1035)
    }

    pub fn check(count: usize, resolver: &str) -> Self {
        Self::new("Check Mail Records")
            .description(&format!(
                "Checks {count} domain{} for DMARC, SPF and reverse DNS records using the resolver at {resolver}.",
                if count == 1 { "" } else { "s" }
            ))
            .request(&format!("GET {resolver}?name={}&type={}", dmarc_name("<domain>"), RecordType::Txt))
            .request(&format!("GET {resolver}?name=<domain>&type={}", RecordType::Txt))
            .request(&format!("GET {resolver}?name=<domain>&type={}", RecordType::Ptr))
            .step("DMARC: any TXT record at _dmarc.<domain> counts as a published policy")
            .step("SPF: a TXT record at <domain> must contain 'v=spf1'")
            .step("rDNS: any PTR answer for the name itself counts as configured")
            .step("If any of the three lookups fails, the domain is marked failed and no flags are kept")
            .rfc(7489)
    }

    pub fn lookup(name: &str, record_type: RecordType, resolver: &str) -> Self {
        let meaning = match record_type {
            RecordType::Txt => "TXT records hold free-form text such as SPF and DMARC policies.",
            RecordType::Ptr => "PTR records map a name back to a host, usually under in-addr.arpa.",
        };

        Self::new("Raw Lookup")
            .description(&format!("Asks the DNS-over-HTTPS resolver for the {record_type} records of {name}. {meaning}"))
            .request(&format!("GET {resolver}?name={name}&type={record_type}"))
            .step("The resolver answers with JSON in the application/dns-json format")
            .step("Status 0 is NOERROR; status 3 (NXDOMAIN) means the name does not exist")
            .rfc(8484)
    }
}
