//! Internet-domain helpers shared by the generator and the matchers.

use url::Url;

use crate::object::CrmObject;

/// Words dropped from a company name before it becomes a domain.
pub const CORPORATE_SUFFIXES: &[&str] = &[
  "inc",
  "llc",
  "ltd",
  "corp",
  "corporation",
  "co",
  "company",
  "group",
  "plc",
  "gmbh",
  "and",
  "the",
  "industries",
  "enterprises",
  "holdings",
];

/// The deterministic part of a company's domain.
///
/// Lowercases, drops everything that is not ASCII alphanumeric or whitespace,
/// removes [`CORPORATE_SUFFIXES`] words, and joins what is left with no
/// separator: `"Acme Widgets, Inc."` → `"acmewidgets"`.
pub fn domain_stem(company_name: &str) -> String {
  let cleaned: String = company_name
    .chars()
    .filter_map(|c| {
      if c.is_ascii_alphanumeric() {
        Some(c.to_ascii_lowercase())
      } else if c.is_whitespace() {
        Some(' ')
      } else {
        None
      }
    })
    .collect();

  cleaned
    .split_whitespace()
    .filter(|word| !CORPORATE_SUFFIXES.contains(word))
    .collect()
}

/// Lowercased host part of an email address.
///
/// `None` unless the address contains exactly one `@` followed by a
/// non-empty host.
pub fn email_domain(email: &str) -> Option<String> {
  let (_, host) = email.trim().split_once('@')?;
  if host.is_empty() || host.contains('@') {
    return None;
  }
  Some(host.to_ascii_lowercase())
}

/// Host of a website URL without a leading `www.`.
///
/// Scheme-less input is parsed as `https://`. When the URL does not parse,
/// a leading scheme and a leading `www.` are stripped from the raw string
/// instead.
pub fn website_domain(website: &str) -> Option<String> {
  let website = website.trim();
  if website.is_empty() {
    return None;
  }

  let candidate = if website.starts_with("http") {
    website.to_owned()
  } else {
    format!("https://{website}")
  };

  let host = Url::parse(&candidate)
    .ok()
    .and_then(|url| url.host_str().map(str::to_owned))
    .unwrap_or_else(|| strip_scheme(website).to_owned());

  let host = host.strip_prefix("www.").unwrap_or(&host).to_ascii_lowercase();
  (!host.is_empty()).then_some(host)
}

fn strip_scheme(s: &str) -> &str {
  s.strip_prefix("https://")
    .or_else(|| s.strip_prefix("http://"))
    .unwrap_or(s)
}

/// The domain a CRM company is matched on: its `domain` property, or failing
/// that the host of its `website`.
pub fn company_domain(company: &CrmObject) -> Option<String> {
  company
    .property("domain")
    .map(|d| d.trim().to_ascii_lowercase())
    .or_else(|| company.property("website").and_then(website_domain))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stem_strips_suffixes_and_punctuation() {
    assert_eq!(domain_stem("Acme Widgets, Inc."), "acmewidgets");
    assert_eq!(domain_stem("Smith, Jones and Partners LLC"), "smithjonespartners");
    assert_eq!(domain_stem("  The   Hooli   Group "), "hooli");
  }

  #[test]
  fn stem_of_only_suffix_words_is_empty() {
    assert_eq!(domain_stem("The Company"), "");
  }

  #[test]
  fn email_domain_is_lowercased() {
    assert_eq!(email_domain("Bob@Acme.COM").as_deref(), Some("acme.com"));
  }

  #[test]
  fn malformed_emails_have_no_domain() {
    assert_eq!(email_domain("no-at-sign"), None);
    assert_eq!(email_domain("a@b@c.com"), None);
    assert_eq!(email_domain("trailing@"), None);
  }

  #[test]
  fn website_domain_strips_www_and_path() {
    assert_eq!(
      website_domain("https://www.widgets.io/about").as_deref(),
      Some("widgets.io")
    );
    assert_eq!(website_domain("www.acme.com").as_deref(), Some("acme.com"));
    assert_eq!(website_domain("http://shop.example.org").as_deref(), Some("shop.example.org"));
  }

  #[test]
  fn website_domain_falls_back_on_unparseable_input() {
    assert_eq!(website_domain("http://www.bad host").as_deref(), Some("bad host"));
    assert_eq!(website_domain("   "), None);
  }

  #[test]
  fn company_domain_prefers_explicit_property() {
    let both = CrmObject::new("1")
      .with_property("domain", "Acme.com")
      .with_property("website", "https://www.other.io");
    assert_eq!(company_domain(&both).as_deref(), Some("acme.com"));

    let website_only =
      CrmObject::new("2").with_property("website", "https://www.widgets.io/about");
    assert_eq!(company_domain(&website_only).as_deref(), Some("widgets.io"));

    assert_eq!(company_domain(&CrmObject::new("3")), None);
  }
}
