//! Authentication endpoints: OTP sign-up/sign-in, session refresh, identity.

use crate::error::{ClientError, Result};
use crate::http::ApiRequest;
use crate::interceptor::{SessionInterceptor, IDENTITY_PATH, REFRESH_PATH};
use crate::types::{
    AuthAck, GoogleAuthUrl, MeResponse, OtpVerification, SigninRequest, SignupRequest,
    VerifyOtpRequest, VerifyOtpResponse,
};
use jotter_core::{validation, User};
use serde::Serialize;
use tracing::{debug, info, warn};

const DEFAULT_OTP_REJECTION: &str = "OTP verification failed";

/// Authentication client for the notes API.
pub struct AuthApi<'a> {
    api: &'a SessionInterceptor,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(api: &'a SessionInterceptor) -> Self {
        Self { api }
    }

    /// Register a new account; the server emails a code on success.
    pub async fn signup(&self, name: &str, dob: &str, email: &str) -> Result<AuthAck> {
        validation::validate_name(name)?;
        validation::validate_dob(dob)?;
        validation::validate_email(email)?;

        let body = SignupRequest {
            name: name.trim(),
            dob: dob.trim(),
            email: email.trim(),
        };
        debug!(email = %body.email, "Requesting sign-up code");

        let ack: AuthAck = self
            .api
            .execute_json(ApiRequest::post_json("/auth/signup", to_json(&body)?))
            .await?;
        log_ack("signup", &ack);
        Ok(ack)
    }

    /// Ask for a sign-in code for an existing account.
    pub async fn signin(&self, email: &str) -> Result<AuthAck> {
        validation::validate_email(email)?;

        let body = SigninRequest {
            email: email.trim(),
        };
        debug!(email = %body.email, "Requesting sign-in code");

        let ack: AuthAck = self
            .api
            .execute_json(ApiRequest::post_json("/auth/signin", to_json(&body)?))
            .await?;
        log_ack("signin", &ack);
        Ok(ack)
    }

    /// Submit the emailed code.
    ///
    /// Wrong or expired codes come back as [`OtpVerification::Rejected`],
    /// not as errors.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<OtpVerification> {
        validation::validate_email(email)?;
        validation::validate_otp(otp)?;

        let body = VerifyOtpRequest {
            email: email.trim(),
            otp: otp.trim(),
        };
        let request = ApiRequest::post_json("/auth/verify-otp", to_json(&body)?);

        match self.api.execute(request).await {
            Ok(body) => {
                let response: VerifyOtpResponse = serde_json::from_value(body).map_err(|e| {
                    ClientError::ParseError(format!("Failed to parse verify-otp response: {}", e))
                })?;
                match response.user {
                    Some(user) => {
                        info!(user_id = %user.id, "OTP verified");
                        Ok(OtpVerification::Verified(user))
                    }
                    None => Ok(OtpVerification::Rejected(
                        response
                            .message
                            .unwrap_or_else(|| DEFAULT_OTP_REJECTION.to_string()),
                    )),
                }
            }
            Err(ClientError::Status {
                status, message, ..
            }) if (400..500).contains(&status) && status != 401 => {
                warn!(status, message = %message, "OTP rejected");
                let message = if message.is_empty() {
                    DEFAULT_OTP_REJECTION.to_string()
                } else {
                    message
                };
                Ok(OtpVerification::Rejected(message))
            }
            Err(e) => Err(e),
        }
    }

    /// Exchange the refresh cookie for a fresh session cookie.
    pub async fn refresh(&self) -> Result<()> {
        self.api.execute(ApiRequest::post(REFRESH_PATH)).await?;
        Ok(())
    }

    /// End the session on the server.
    pub async fn logout(&self) -> Result<AuthAck> {
        let body = self.api.execute(ApiRequest::post("/auth/logout")).await?;
        if body.is_null() {
            return Ok(AuthAck {
                success: true,
                message: None,
            });
        }
        serde_json::from_value(body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse logout response: {}", e)))
    }

    /// Fetch the signed-in user.
    pub async fn me(&self) -> Result<User> {
        let response: MeResponse = self.api.execute_json(ApiRequest::get(IDENTITY_PATH)).await?;
        Ok(response.user)
    }

    /// URL that starts the Google sign-in flow.
    pub async fn google_auth_url(&self) -> Result<GoogleAuthUrl> {
        self.api
            .execute_json(ApiRequest::get("/auth/google/auth-url"))
            .await
    }
}

fn to_json<T: Serialize>(body: &T) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| ClientError::ParseError(e.to_string()))
}

fn log_ack(operation: &str, ack: &AuthAck) {
    if ack.success {
        info!(operation, "Code sent");
    } else {
        warn!(operation, message = ?ack.message, "Server declined to send a code");
    }
}
