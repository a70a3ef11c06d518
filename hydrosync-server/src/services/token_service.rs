use hydrosync_api::MacAddress;
use jsonwebtoken::errors::Error;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::configs::Auth;
use crate::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub mac: String,
    pub token: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// MAC address of the authenticated device
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

impl TokenClaims {
    pub fn mac(&self) -> Result<MacAddress, AuthError> {
        MacAddress::parse(&self.sub).map_err(|_| AuthError::InvalidToken)
    }
}

#[derive(Clone)]
pub struct TokenService {
    expiration: u64,
    secret: String,
}

impl TokenService {
    pub fn new(auth: Auth) -> Self {
        Self {
            expiration: auth.expiration,
            secret: auth.secret,
        }
    }

    pub fn retrieve_token_claims(&self, token: &str) -> Result<TokenData<TokenClaims>, Error> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
    }

    pub fn generate_token(&self, mac: &MacAddress) -> Result<Token, Error> {
        let iat = OffsetDateTime::now_utc().unix_timestamp().max(0) as u64;
        let exp = iat + self.expiration;

        let claims = TokenClaims {
            sub: mac.to_string(),
            iat,
            exp,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_ref());

        let token = encode(&Header::default(), &claims, &encoding_key)?;

        Ok(Token {
            mac: claims.sub,
            token,
            iat,
            exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::errors::ErrorKind;

    use crate::tests::test_auth;

    use super::*;

    #[test]
    fn test_generate_and_retrieve_token() {
        let token_service = TokenService::new(test_auth());
        let mac = MacAddress::parse("00:1A:C2:7B:00:47").unwrap();

        let token = token_service.generate_token(&mac).unwrap();
        assert_eq!(token.exp - token.iat, test_auth().expiration);

        let claims = token_service.retrieve_token_claims(&token.token).unwrap().claims;
        assert_eq!(claims.sub, mac.to_string());
    }

    #[test]
    fn test_tokens_differ_per_device() {
        let token_service = TokenService::new(test_auth());

        let first = token_service
            .generate_token(&MacAddress::parse("00:1A:C2:7B:00:47").unwrap())
            .unwrap();
        let second = token_service
            .generate_token(&MacAddress::parse("07:2B:C2:7B:00:47").unwrap())
            .unwrap();

        assert_ne!(first.token, second.token);
    }

    #[test]
    fn test_rejects_foreign_secret() {
        let token_service = TokenService::new(test_auth());
        let mut other_auth = test_auth();
        other_auth.secret = "other-secret".to_string();
        let other = TokenService::new(other_auth);

        let token = other
            .generate_token(&MacAddress::parse("00:1A:C2:7B:00:47").unwrap())
            .unwrap();

        assert!(token_service.retrieve_token_claims(&token.token).is_err());
        assert!(token_service.retrieve_token_claims("invalidToken").is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let token_service = TokenService::new(test_auth());
        let now = OffsetDateTime::now_utc().unix_timestamp() as u64;
        let claims = TokenClaims {
            sub: "00:1A:C2:7B:00:47".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(test_auth().secret.as_ref()),
        )
        .unwrap();

        let error = token_service.retrieve_token_claims(&token).unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::ExpiredSignature));
    }
}
