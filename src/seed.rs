//! Fixture data for a fresh database.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use crate::error::StoreError;
use crate::models::{Butterfly, User, COLLECTIONS};
use crate::store::{DocumentStore, FileBackend};

const BUTTERFLIES: [(&str, &str, &str); 6] = [
    ("Hq4Rk_vOPMehRX2ar6LKX", "Zebra Swallowtail", "Protographium marcellus"),
    ("H7hhcEWLDsxyHN0cnDrBV", "Plum Judy", "Abisara echerius"),
    ("VJ5v4ZEQVL92XaaSl7xgD", "Red Pierrot", "Talicada nyseus"),
    ("juX-MCpw0NUW1xh40xgVc", "Texan Crescentspot", "Anthanassa texana"),
    ("HIoGrnyIiUeIvAyhaYpit", "Guava Skipper", "Phocides polybius"),
    ("HlvjJBL8BLw2HFETsr9Sv", "Mexican Bluewing", "Myscelia ethusa"),
];

const USERS: [(&str, &str); 3] = [
    ("-9aAFuyNIkpSzRMNux2BQ", "iluvbutterflies"),
    ("15rKqk4vDp7V5vE1MYG3t", "flutterby"),
    ("2rWtjZcs88ElPfRSSL3Zm", "metamorphosize_me"),
];

pub fn butterflies() -> Vec<Butterfly> {
    BUTTERFLIES
        .iter()
        .map(|(id, common_name, species)| Butterfly {
            id: id.to_string(),
            common_name: common_name.to_string(),
            species: species.to_string(),
            article: format!(
                "https://en.wikipedia.org/wiki/{}",
                species.replace(' ', "_")
            ),
            ratings: Vec::new(),
        })
        .collect()
}

pub fn users() -> Vec<User> {
    USERS
        .iter()
        .map(|(id, username)| User {
            id: id.to_string(),
            username: username.to_string(),
        })
        .collect()
}

/// Delete any document at `path` and write the fixture data in its place.
pub fn reset_database(path: &Path) -> Result<DocumentStore<FileBackend>, StoreError> {
    match fs::remove_file(path) {
        Ok(()) => info!(path = %path.display(), "removed existing database"),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }

    let store = DocumentStore::open(FileBackend::new(path), &COLLECTIONS)?;
    for butterfly in butterflies() {
        store.append(&butterfly)?;
    }
    for user in users() {
        store.append(&user)?;
    }

    info!(
        path = %path.display(),
        butterflies = BUTTERFLIES.len(),
        users = USERS.len(),
        "database seeded"
    );
    Ok(store)
}
