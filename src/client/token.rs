//! Token provisioning on behalf of the resolved user.
//!
//! [`IdentityClient::create_token`] resolves the acting user first and refuses to contact the
//! token endpoint without one. The created key is handed straight back to the caller; nothing
//! about it is stored locally.

// self
use crate::{
	_prelude::*,
	auth::{CreateTokenResponse, TokenConfig, TokenRequestBody},
	client::{
		IdentityClient,
		common::{self, TOKEN_ENDPOINT},
	},
	error::ConfigError,
	http::{ApiRequest, ApiTransport},
	obs::{self, OpKind, OpOutcome, OpSpan},
};

impl<T> IdentityClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates an unlimited, never-expiring token named and grouped per `config`.
	///
	/// Fails with [`Error::NotAuthenticated`] before any request when no user can be resolved,
	/// and with [`Error::RemoteRequestFailed`] on transport errors, non-2xx statuses, or bodies
	/// that are not a token response. A 2xx answer is returned as-is, including
	/// `success: false` rejections.
	pub async fn create_token(&self, config: &TokenConfig) -> Result<CreateTokenResponse> {
		const KIND: OpKind = OpKind::CreateToken;

		let span = OpSpan::new(KIND, "create_token");

		obs::record_op_outcome(KIND, OpOutcome::Attempt);

		let result: Result<CreateTokenResponse> = span
			.instrument(async move {
				config.validate().map_err(ConfigError::from)?;

				let user_id = self.resolve_user_id().await.ok_or(Error::NotAuthenticated)?;
				let body = serde_json::to_vec(&TokenRequestBody::from_config(config))
					.map_err(|source| ConfigError::RequestBody { source })?;
				let request = ApiRequest::post_json(self.descriptor.endpoints.token.clone(), body)
					.with_header(&self.descriptor.identity_header, user_id.header_value());
				let response = self.dispatch(TOKEN_ENDPOINT, request).await?;

				Ok(common::parse_body(TOKEN_ENDPOINT, &response)?)
			})
			.await;

		match &result {
			Ok(_) => obs::record_op_outcome(KIND, OpOutcome::Success),
			Err(_) => obs::record_op_outcome(KIND, OpOutcome::Failure),
		}

		result
	}
}
