//! Pooled fake-data provider for patient demographics.
//!
//! This module is a stand-in for a full demographic-data service: every value
//! is drawn from small hardcoded pools, flavoured by the active locale. All
//! data is fictional. The provider owns its own random stream, seeded
//! independently per generator instance, so two generators never share
//! mutable state.

use crate::config::Locale;
use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

const GIVEN_NAMES: [&str; 12] = [
    "James", "Mary", "Robert", "Linda", "Michael", "Susan", "David", "Karen", "Daniel", "Nancy",
    "Thomas", "Laura",
];

const FAMILY_NAMES: [&str; 12] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Wilson", "Anderson",
    "Taylor", "Moore", "Clark",
];

const GIVEN_NAMES_IE: [&str; 12] = [
    "Aoife", "Cian", "Saoirse", "Liam", "Niamh", "Sean", "Siobhan", "Conor", "Orla", "Padraig",
    "Maeve", "Declan",
];

const FAMILY_NAMES_IE: [&str; 12] = [
    "Murphy", "Kelly", "O'Sullivan", "Walsh", "O'Brien", "Byrne", "Ryan", "O'Connor", "Doyle",
    "McCarthy", "Gallagher", "Kennedy",
];

const STREET_NAMES: [&str; 10] = [
    "Main", "Church", "Mill", "Park", "High", "Station", "Chapel", "Bridge", "Green", "River",
];

const STREET_SUFFIXES: [&str; 5] = ["Street", "Road", "Avenue", "Lane", "Drive"];

const CITIES: [&str; 10] = [
    "Springfield",
    "Riverside",
    "Fairview",
    "Georgetown",
    "Clinton",
    "Salem",
    "Madison",
    "Arlington",
    "Ashland",
    "Burlington",
];

const CITIES_IE: [&str; 10] = [
    "Dublin",
    "Cork",
    "Galway",
    "Limerick",
    "Waterford",
    "Drogheda",
    "Dundalk",
    "Swords",
    "Navan",
    "Ennis",
];

const US_STATES: [&str; 12] = [
    "California",
    "Texas",
    "New York",
    "Florida",
    "Illinois",
    "Ohio",
    "Georgia",
    "Michigan",
    "Oregon",
    "Colorado",
    "Virginia",
    "Arizona",
];

const COUNTRY_CODES: [&str; 8] = ["US", "GB", "CA", "AU", "NZ", "DE", "FR", "NL"];

const EMAIL_DOMAINS: [&str; 4] = [
    "example.com",
    "example.org",
    "mail.example.net",
    "post.example.ie",
];

/// A generated person name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonName {
    pub given: String,
    pub family: String,
}

/// Generated postal-address fields, excluding the region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressFields {
    pub street_line: String,
    pub city: String,
    pub postal_code: String,
}

/// Locale-flavoured fake demographic data source.
pub struct Faker {
    locale: Locale,
    rng: StdRng,
}

impl Faker {
    /// Create a provider seeded from OS entropy.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic provider for reproducible output.
    pub fn seeded(locale: Locale, seed: u64) -> Self {
        Self {
            locale,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn name(&mut self) -> PersonName {
        let (given_pool, family_pool) = if self.locale.is_irish() {
            (&GIVEN_NAMES_IE, &FAMILY_NAMES_IE)
        } else {
            (&GIVEN_NAMES, &FAMILY_NAMES)
        };
        PersonName {
            given: self.choose(given_pool).to_string(),
            family: self.choose(family_pool).to_string(),
        }
    }

    pub fn address_fields(&mut self) -> AddressFields {
        let number = self.rng.gen_range(1..200);
        let street = self.choose(&STREET_NAMES);
        let suffix = self.choose(&STREET_SUFFIXES);
        let city_pool = if self.locale.is_irish() {
            &CITIES_IE
        } else {
            &CITIES
        };
        AddressFields {
            street_line: format!("{number} {street} {suffix}"),
            city: self.choose(city_pool).to_string(),
            postal_code: self.postal_code(),
        }
    }

    /// A generic region name; Irish county selection is handled by the
    /// caller via the catalog's county list.
    pub fn region(&mut self) -> String {
        self.choose(&US_STATES).to_string()
    }

    pub fn country_code(&mut self) -> String {
        self.choose(&COUNTRY_CODES).to_string()
    }

    pub fn phone(&mut self) -> String {
        if self.locale.is_irish() {
            format!(
                "+353 8{} {:03} {:04}",
                self.rng.gen_range(3..10),
                self.rng.gen_range(0..1000),
                self.rng.gen_range(0..10_000),
            )
        } else {
            format!(
                "({:03}) {:03}-{:04}",
                self.rng.gen_range(200..1000),
                self.rng.gen_range(200..1000),
                self.rng.gen_range(0..10_000),
            )
        }
    }

    pub fn email(&mut self) -> String {
        let name = self.name();
        let domain = self.choose(&EMAIL_DOMAINS);
        let tag = self.rng.gen_range(1..100);
        format!(
            "{}.{}{}@{}",
            name.given.to_lowercase(),
            name.family.to_lowercase().replace('\'', ""),
            tag,
            domain,
        )
    }

    /// A national-identifier value in the locale's format: an Irish PPS
    /// number (7 digits + 2 letters) or a US-style SSN.
    pub fn identifier_value(&mut self) -> String {
        if self.locale.is_irish() {
            let digits = self.rng.gen_range(0..10_000_000u32);
            let letter = (b'A' + self.rng.gen_range(0..23u8)) as char;
            let check = if self.rng.gen_bool(0.5) { 'A' } else { 'H' };
            format!("{digits:07}{letter}{check}")
        } else {
            format!(
                "{:03}-{:02}-{:04}",
                self.rng.gen_range(100..900),
                self.rng.gen_range(10..100),
                self.rng.gen_range(0..10_000),
            )
        }
    }

    /// The first 8 hex characters of a random UUID, used to build resource
    /// ids like `patient-1a2b3c4d`.
    ///
    /// The UUID is built from this provider's random stream rather than OS
    /// entropy so seeded runs produce stable ids.
    pub fn uuid_fragment(&mut self) -> String {
        let value: u128 = self.rng.gen();
        let mut fragment = Uuid::from_u128(value).simple().to_string();
        fragment.truncate(8);
        fragment
    }

    /// A date of birth for an age uniformly inside `[min_age, max_age]`.
    pub fn date_of_birth(&mut self, min_age: u32, max_age: u32) -> NaiveDate {
        // 366/365 day multipliers keep the window inclusive across leap years.
        let min_days = i64::from(min_age) * 366;
        let max_days = i64::from(max_age) * 365;
        let days_ago = self.rng.gen_range(min_days..=max_days);
        Utc::now().date_naive() - Duration::days(days_ago)
    }

    /// A postal code in the locale's format: Eircode-shaped for Irish
    /// addresses, five-digit ZIP otherwise.
    fn postal_code(&mut self) -> String {
        if self.locale.is_irish() {
            let routing_letter = self.eircode_char();
            let routing_digits = self.rng.gen_range(1..25u8);
            let unique: String = (0..4).map(|_| self.eircode_char_or_digit()).collect();
            format!("{routing_letter}{routing_digits:02} {unique}")
        } else {
            format!("{:05}", self.rng.gen_range(10_000..100_000))
        }
    }

    fn eircode_char(&mut self) -> char {
        // Eircodes avoid the letters that read as digits.
        const ALPHABET: &[u8] = b"ACDEFHKNPRTVWXY";
        ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char
    }

    fn eircode_char_or_digit(&mut self) -> char {
        if self.rng.gen_bool(0.5) {
            self.eircode_char()
        } else {
            (b'0' + self.rng.gen_range(0..10u8)) as char
        }
    }

    fn choose<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        pool.choose(&mut self.rng).expect("pools are non-empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_provider_is_deterministic() {
        let mut first = Faker::seeded(Locale::EnUs, 42);
        let mut second = Faker::seeded(Locale::EnUs, 42);
        assert_eq!(first.name(), second.name());
        assert_eq!(first.uuid_fragment(), second.uuid_fragment());
        assert_eq!(first.identifier_value(), second.identifier_value());
    }

    #[test]
    fn uuid_fragment_is_eight_hex_chars() {
        let mut faker = Faker::seeded(Locale::EnUs, 1);
        for _ in 0..20 {
            let fragment = faker.uuid_fragment();
            assert_eq!(fragment.len(), 8);
            assert!(fragment.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn date_of_birth_stays_inside_age_window() {
        let mut faker = Faker::seeded(Locale::EnUs, 2);
        let today = Utc::now().date_naive();
        for _ in 0..50 {
            let dob = faker.date_of_birth(18, 90);
            let age = today.years_since(dob).expect("dob is in the past");
            assert!((18..=90).contains(&age), "age {age} outside window");
        }
    }

    #[test]
    fn irish_identifier_looks_like_pps_number() {
        let mut faker = Faker::seeded(Locale::EnIe, 3);
        let value = faker.identifier_value();
        assert_eq!(value.len(), 9);
        assert!(value[..7].chars().all(|c| c.is_ascii_digit()));
        assert!(value[7..].chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn us_identifier_is_ssn_shaped() {
        let mut faker = Faker::seeded(Locale::EnUs, 4);
        let value = faker.identifier_value();
        let parts: Vec<&str> = value.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 3);
        assert_eq!(parts[1].len(), 2);
        assert_eq!(parts[2].len(), 4);
    }

    #[test]
    fn postal_codes_follow_locale_format() {
        let mut us = Faker::seeded(Locale::EnUs, 6);
        let zip = us.address_fields().postal_code;
        assert_eq!(zip.len(), 5);
        assert!(zip.chars().all(|c| c.is_ascii_digit()));

        let mut ie = Faker::seeded(Locale::EnIe, 6);
        let eircode = ie.address_fields().postal_code;
        assert_eq!(eircode.len(), 8);
        assert_eq!(eircode.as_bytes()[3], b' ');
        assert!(eircode.chars().next().expect("non-empty").is_ascii_uppercase());
    }

    #[test]
    fn irish_pools_flavour_names() {
        let mut faker = Faker::seeded(Locale::EnIe, 5);
        let name = faker.name();
        assert!(GIVEN_NAMES_IE.contains(&name.given.as_str()));
        assert!(FAMILY_NAMES_IE.contains(&name.family.as_str()));
    }
}
