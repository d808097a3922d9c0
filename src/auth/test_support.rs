// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared helpers for auth tests.

use std::sync::OnceLock;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};

use super::claims::ClaimsSet;

/// A 2048-bit RSA key pair as `(public_pem, private_pem)`, generated once.
pub fn rsa_keys() -> &'static (Vec<u8>, Vec<u8>) {
    static KEYS: OnceLock<(Vec<u8>, Vec<u8>)> = OnceLock::new();
    KEYS.get_or_init(|| {
        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate RSA key");
        let public = RsaPublicKey::from(&private);

        let private_pem = private
            .to_pkcs1_pem(LineEnding::LF)
            .expect("Failed to encode private key")
            .as_bytes()
            .to_vec();
        let public_pem = public
            .to_pkcs1_pem(LineEnding::LF)
            .expect("Failed to encode public key")
            .into_bytes();

        (public_pem, private_pem)
    })
}

/// Assemble a token from a raw header, claims and signature segment.
pub fn forge_token(header_json: &str, claims: &ClaimsSet, signature: &str) -> String {
    let header_b64 = URL_SAFE_NO_PAD.encode(header_json.as_bytes());
    let claims_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
    format!("{header_b64}.{claims_b64}.{signature}")
}

/// Flip every bit of one decoded signature byte and re-encode the token.
pub fn tamper_signature(token: &str, byte_index: usize) -> String {
    let (message, signature) = token.rsplit_once('.').unwrap();
    let mut bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
    bytes[byte_index] ^= 0xff;
    format!("{message}.{}", URL_SAFE_NO_PAD.encode(bytes))
}

/// Build a header map carrying `value` under `Authorization`.
pub fn bearer_headers(value: &str) -> axum::http::HeaderMap {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        axum::http::HeaderValue::from_str(value).unwrap(),
    );
    headers
}
