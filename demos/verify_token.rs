//! Verify a Cognito token from the command line.
//!
//! ```sh
//! COGNITO_REGION=eu-west-1 \
//! COGNITO_USER_POOL_ID=eu-west-1_AbCdEf123 \
//! COGNITO_CLIENT_ID=my-app-client \
//! cargo run --example verify_token -- <id|access> <token>
//! ```

use std::env;
use std::sync::Arc;
use std::time::Duration;

use cognito_verify::CognitoVerifier;
use cognito_verify::MemoryCache;
use cognito_verify::VerifierConfig;
use cognito_verify::VerifyToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let region = env::var("COGNITO_REGION")?;
    let user_pool_id = env::var("COGNITO_USER_POOL_ID")?;
    let client_id = env::var("COGNITO_CLIENT_ID")?;

    let mut args = env::args().skip(1);
    let (Some(kind), Some(token)) = (args.next(), args.next()) else {
        usage();
    };
    let Some(kind) = TokenKind::parse(&kind) else {
        usage();
    };

    // Construction fetches the JWKS, bound it with a client timeout
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    let config = VerifierConfig::new(region, user_pool_id, client_id)
        .with_http_client(client)
        .with_cache(Arc::new(MemoryCache::new()));

    let verifier = CognitoVerifier::new(config).await?;
    println!("Loaded {} keys from {}", verifier.key_set().keys.len(), verifier.issuer());

    let result = match kind {
        TokenKind::Id => verifier.verify_id_token(&token),
        TokenKind::Access => verifier.verify_access_token(&token),
    };

    match result {
        Ok(claims) => {
            println!("✓ Token verified successfully!");
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
        Err(e) => {
            eprintln!("✗ Token verification failed [{}]: {}", e.code(), e);
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq)]
enum TokenKind {
    Id,
    Access,
}

impl TokenKind {
    fn parse(arg: &str) -> Option<Self> {
        match arg {
            "id" => Some(Self::Id),
            "access" => Some(Self::Access),
            _ => None,
        }
    }
}

fn usage() -> ! {
    eprintln!("usage: verify_token <id|access> <token>");
    std::process::exit(2);
}
