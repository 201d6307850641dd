//! Sign and verify throughput per algorithm

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::Duration;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tokenmint_jwt::{generate_keypair, Algorithm, AsyncTokenCodec, ClaimsBuilder, TokenCodec};
use tokio::runtime::Runtime;

fn sample_claims() -> tokenmint_jwt::ClaimSet {
    ClaimsBuilder::new()
        .issuer("hyuga.tsukui")
        .subject("6a1ba3c4-9a96-40b4-beed-e9c2f8927124")
        .claim("name", "tsukui")
        .claim("email", "john.doe@example.com")
        .expires_in(Duration::hours(24))
        .build()
        .expect("valid claims")
}

/// Synchronous sign and verify for every algorithm
fn benchmark_codec(c: &mut Criterion) {
    let codec = TokenCodec::new();
    let claims = sample_claims();
    let mut group = c.benchmark_group("codec");

    for algorithm in Algorithm::ALL {
        let (signing_key, verification_key) =
            generate_keypair(algorithm).expect("key generation should succeed");
        let token = codec.sign(&claims, &signing_key).expect("signing should succeed");

        group.bench_with_input(BenchmarkId::new("sign", algorithm), &claims, |b, claims| {
            b.iter(|| {
                let token = codec
                    .sign(claims, &signing_key)
                    .expect("signing should succeed");
                std::hint::black_box(token);
            });
        });

        group.bench_with_input(
            BenchmarkId::new("verify", algorithm),
            token.as_str(),
            |b, token| {
                b.iter(|| {
                    let claims = codec
                        .verify(token, &verification_key)
                        .expect("verification should succeed");
                    std::hint::black_box(claims);
                });
            },
        );
    }
    group.finish();
}

/// Overhead of the blocking-pool hop
fn benchmark_async_overhead(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let codec = AsyncTokenCodec::default();
    let claims = sample_claims();
    let (signing_key, _) = generate_keypair(Algorithm::ES256).expect("key generation");

    c.bench_function("async_sign_es256", |b| {
        b.iter(|| {
            rt.block_on(async {
                let token = codec
                    .sign(claims.clone(), signing_key.clone())
                    .await
                    .expect("signing should succeed");
                std::hint::black_box(token);
            });
        });
    });
}

criterion_group!(benches, benchmark_codec, benchmark_async_overhead);
criterion_main!(benches);
