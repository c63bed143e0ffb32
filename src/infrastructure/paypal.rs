use crate::config::{AppConfig, Credentials};
use crate::domain::amount::Amount;
use crate::domain::cart::{BillingDetails, Cart};
use crate::domain::order::Order;
use crate::domain::ports::PaymentGateway;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header;
use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Cached tokens are refreshed this long before their reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + EXPIRY_MARGIN < self.expires_at
    }
}

/// PayPal Orders v2 client.
///
/// One access token is cached process-wide behind an `RwLock`; refresh is
/// double-checked so concurrent requests waiting on the write lock do not
/// each hit the token endpoint. Every order call carries its own
/// `PayPal-Request-Id`, so a retried create or capture cannot
/// double-charge.
pub struct PaypalGateway {
    http: reqwest::Client,
    api_url: String,
    public_base_url: String,
    credentials: Credentials,
    token: RwLock<Option<CachedToken>>,
}

impl PaypalGateway {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_url: config.paypal_api_url.clone(),
            public_base_url: config.public_base_url.clone(),
            credentials: config.credentials.clone(),
            token: RwLock::new(None),
        })
    }

    async fn access_token(&self) -> Result<String> {
        {
            let guard = self.token.read().await;
            if let Some(token) = guard.as_ref() {
                if token.is_fresh() {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let mut guard = self.token.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(token) = guard.as_ref() {
            if token.is_fresh() {
                return Ok(token.access_token.clone());
            }
        }

        let token = self.fetch_token().await?;
        let access_token = token.access_token.clone();
        *guard = Some(token);
        Ok(access_token)
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        debug!("requesting provider access token");
        let basic = STANDARD.encode(format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        ));
        let response = self
            .http
            .post(format!("{}/v1/oauth2/token", self.api_url))
            .header(header::AUTHORIZATION, format!("Basic {}", basic))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CheckoutError::ProviderAuth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CheckoutError::ProviderAuth(format!("token response: {}", e)))?;
        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }

    /// The order description sent to the provider. Always requests SCA so
    /// card payments go through the 3DS challenge.
    fn order_payload(&self, cart: &Cart, billing: Option<&BillingDetails>) -> serde_json::Value {
        let total = Amount::new(cart.subtotal()).to_string();
        let items: Vec<serde_json::Value> = cart
            .items
            .iter()
            .map(|item| {
                json!({
                    "name": item.name,
                    "unit_amount": {
                        "currency_code": "USD",
                        "value": Amount::new(item.price).to_string()
                    },
                    "quantity": item.quantity.to_string(),
                    "category": "PHYSICAL_GOODS"
                })
            })
            .collect();

        let mut payload = json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "amount": {
                    "currency_code": "USD",
                    "value": total,
                    "breakdown": {
                        "item_total": { "currency_code": "USD", "value": total }
                    }
                },
                "items": items
            }],
            "payment_source": {
                "card": {
                    "experience_context": {
                        "return_url": format!("{}/success", self.public_base_url),
                        "cancel_url": format!("{}/cancel", self.public_base_url),
                        "brand_name": "GameMaster Board Games",
                        "user_action": "PAY_NOW"
                    },
                    "verification_method": "SCA_ALWAYS",
                    "attributes": { "contingencies": ["3D_SECURE"] }
                }
            }
        });

        if let Some(billing) = billing {
            let mut payer = json!({
                "name": {
                    "given_name": billing.first_name.clone().unwrap_or_default(),
                    "surname": billing.last_name.clone().unwrap_or_default()
                },
                "address": {
                    "address_line_1": billing.address.clone().unwrap_or_default(),
                    "admin_area_2": billing.city.clone().unwrap_or_default(),
                    "admin_area_1": billing.state.clone().unwrap_or_default(),
                    "postal_code": billing.zip_code.clone().unwrap_or_default(),
                    "country_code": billing.country.as_deref().unwrap_or("US")
                }
            });
            if let Some(email) = &billing.email {
                payer["email_address"] = json!(email);
            }
            payload["payer"] = payer;
        }

        payload
    }

    async fn post_order(
        &self,
        path: &str,
        request_id: String,
        body: serde_json::Value,
    ) -> Result<Order> {
        let token = self.access_token().await?;
        let response = self
            .http
            .post(format!("{}{}", self.api_url, path))
            .bearer_auth(token)
            .header("PayPal-Request-Id", &request_id)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let payload = match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => value,
            Err(_) => serde_json::Value::String(text),
        };

        if !status.is_success() {
            return Err(CheckoutError::ProviderRequest {
                status: status.as_u16(),
                payload,
            });
        }
        Order::from_value(payload)
    }
}

#[async_trait]
impl PaymentGateway for PaypalGateway {
    async fn create_order(&self, cart: &Cart, billing: Option<&BillingDetails>) -> Result<Order> {
        let request_id = format!("gamemaster-{}", Uuid::now_v7());
        info!(request_id = %request_id, "creating provider order");
        let payload = self.order_payload(cart, billing);
        self.post_order("/v2/checkout/orders", request_id, payload)
            .await
    }

    async fn capture_order(&self, order_id: &str) -> Result<Order> {
        let request_id = format!("gamemaster-capture-{}", Uuid::now_v7());
        info!(order_id = %order_id, request_id = %request_id, "capturing provider order");
        self.post_order(
            &format!("/v2/checkout/orders/{}/capture", order_id),
            request_id,
            json!({}),
        )
        .await
    }
}
