//! Domains and email addresses derived from names.

use rand::{Rng, distr::Alphanumeric};
use seedcrm_core::domain::domain_stem;

use crate::{pick, pools::TLDS};

/// Stems shorter than this get a random suffix.
const MIN_STEM_LEN: usize = 3;
const PAD_LEN: usize = 4;

/// Turn a company name into a plausible internet domain.
///
/// The stem is [`domain_stem`] of the name; stems under three characters are
/// padded with four random lowercase alphanumerics. A random TLD follows.
pub fn derive_domain<R: Rng>(rng: &mut R, company_name: &str) -> String {
  let mut stem = domain_stem(company_name);
  if stem.len() < MIN_STEM_LEN {
    stem.extend(
      (0..PAD_LEN).map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase()),
    );
  }
  format!("{stem}.{}", pick(rng, TLDS))
}

/// Build an address at `domain` from one of five name patterns, chosen
/// uniformly: `first.last`, `firstlast`, `flast`, `first_last`, `first`.
pub fn email_for<R: Rng>(
  rng: &mut R,
  firstname: &str,
  lastname: &str,
  domain: &str,
) -> String {
  let first = local_part(firstname);
  let last = local_part(lastname);
  let initial: String = first.chars().take(1).collect();

  let local = match rng.random_range(0..5) {
    0 => format!("{first}.{last}"),
    1 => format!("{first}{last}"),
    2 => format!("{initial}{last}"),
    3 => format!("{first}_{last}"),
    _ => first,
  };
  format!("{local}@{domain}")
}

fn local_part(name: &str) -> String {
  name
    .chars()
    .filter(char::is_ascii_alphanumeric)
    .map(|c| c.to_ascii_lowercase())
    .collect()
}

#[cfg(test)]
mod tests {
  use rand::{SeedableRng, rngs::StdRng};
  use seedcrm_core::domain::email_domain;

  use super::*;

  #[test]
  fn domain_keeps_stem_and_adds_tld() {
    let mut rng = StdRng::seed_from_u64(7);
    let domain = derive_domain(&mut rng, "Acme Widgets, Inc.");
    let (stem, tld) = domain.split_once('.').unwrap();
    assert_eq!(stem, "acmewidgets");
    assert!(TLDS.contains(&tld));
  }

  #[test]
  fn short_stems_are_padded() {
    let mut rng = StdRng::seed_from_u64(7);
    let domain = derive_domain(&mut rng, "IO Group");
    let (stem, _) = domain.split_once('.').unwrap();
    assert_eq!(stem.len(), 2 + PAD_LEN);
    assert!(stem.starts_with("io"));
    assert!(stem.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
  }

  #[test]
  fn every_pattern_lands_on_the_domain() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut locals = std::collections::HashSet::new();
    for _ in 0..200 {
      let email = email_for(&mut rng, "Ada", "O'Brien", "acme.io");
      assert_eq!(email_domain(&email).as_deref(), Some("acme.io"));
      locals.insert(email.split('@').next().unwrap().to_owned());
    }
    let expected: std::collections::HashSet<_> =
      ["ada.obrien", "adaobrien", "aobrien", "ada_obrien", "ada"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(locals, expected);
  }
}
