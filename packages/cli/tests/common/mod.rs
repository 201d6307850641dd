//! PEM fixtures written to a temporary directory.

#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::path::PathBuf;
use tempfile::TempDir;
use tokenmint_jwt::{
    p256, p384,
    rsa::{
        pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey},
        pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding},
        rand_core::OsRng,
        RsaPrivateKey,
    },
};

static RSA_PRIVATE_KEY: Lazy<RsaPrivateKey> = Lazy::new(|| {
    RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA-2048 key generation should succeed")
});

/// Private and public PEM text for one key pair.
pub struct PemPair {
    pub private_pem: String,
    pub public_pem: String,
}

pub fn rsa_pkcs8() -> PemPair {
    let key = &*RSA_PRIVATE_KEY;
    PemPair {
        private_pem: key
            .to_pkcs8_pem(LineEnding::LF)
            .expect("PKCS#8 encoding")
            .to_string(),
        public_pem: key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("SPKI encoding"),
    }
}

pub fn rsa_pkcs1() -> PemPair {
    let key = &*RSA_PRIVATE_KEY;
    PemPair {
        private_pem: key
            .to_pkcs1_pem(LineEnding::LF)
            .expect("PKCS#1 encoding")
            .to_string(),
        public_pem: key
            .to_public_key()
            .to_pkcs1_pem(LineEnding::LF)
            .expect("PKCS#1 public encoding"),
    }
}

pub fn p256_pair() -> PemPair {
    let key = p256::ecdsa::SigningKey::random(&mut p256::elliptic_curve::rand_core::OsRng);
    PemPair {
        private_pem: key
            .to_pkcs8_pem(LineEnding::LF)
            .expect("PKCS#8 encoding")
            .to_string(),
        public_pem: key
            .verifying_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("SPKI encoding"),
    }
}

pub fn p384_pair() -> PemPair {
    let key = p384::ecdsa::SigningKey::random(&mut p384::elliptic_curve::rand_core::OsRng);
    PemPair {
        private_pem: key
            .to_pkcs8_pem(LineEnding::LF)
            .expect("PKCS#8 encoding")
            .to_string(),
        public_pem: key
            .verifying_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("SPKI encoding"),
    }
}

/// Key files inside a temporary directory that lives as long as this value.
pub struct KeyFiles {
    _dir: TempDir,
    pub private_path: PathBuf,
    pub public_path: PathBuf,
}

impl KeyFiles {
    pub fn write(pair: &PemPair) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let private_path = dir.path().join("private.pem");
        let public_path = dir.path().join("public.pem");
        std::fs::write(&private_path, &pair.private_pem).expect("write private key");
        std::fs::write(&public_path, &pair.public_pem).expect("write public key");
        Self {
            _dir: dir,
            private_path,
            public_path,
        }
    }

    pub fn private(&self) -> String {
        self.private_path.display().to_string()
    }

    pub fn public(&self) -> String {
        self.public_path.display().to_string()
    }
}
