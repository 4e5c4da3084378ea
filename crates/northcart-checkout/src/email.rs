//! # Order Email Notifications
//!
//! Rendering and delivery of the two emails sent per placed order: a
//! confirmation to the customer and a new-order notification to the store.
//!
//! ## Delivery Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Email is BEST-EFFORT. The order is already in the ledger before any    │
//! │  send is attempted; a delivery failure is logged and swallowed, the     │
//! │  order stands, and the caller learns about it only through the          │
//! │  `email_delivered` flag on the placed-order result.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering is plain string-built HTML; amounts are formatted through
//! `Money` with the order's currency symbol.

use thiserror::Error;
use tracing::info;

use northcart_core::types::Order;
use northcart_core::Money;

use crate::config::StoreConfig;

// =============================================================================
// Message & Port
// =============================================================================

/// A rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// Email delivery failure.
#[derive(Debug, Error)]
pub enum EmailError {
    /// The provider rejected or failed to accept the message.
    #[error("Email delivery failed: {0}")]
    Delivery(String),
}

/// Delivery port. The storefront ships a logging implementation; a real
/// provider integration substitutes its own.
pub trait EmailNotifier: Send + Sync {
    fn send(
        &self,
        message: EmailMessage,
    ) -> impl std::future::Future<Output = Result<(), EmailError>> + Send;
}

/// Notifier that logs the message instead of delivering it.
///
/// Useful for local development and as the default until a provider is
/// configured.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotifier;

impl EmailNotifier for LoggingNotifier {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            recipients = ?message.recipients,
            subject = %message.subject,
            body_bytes = message.html_body.len(),
            "email send (logging notifier, not delivered)"
        );
        Ok(())
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn amount(cents: i64, symbol: &str) -> String {
    format!("{symbol}{}", Money::from_cents(cents))
}

fn item_rows(order: &Order, symbol: &str) -> String {
    order
        .items
        .iter()
        .map(|item| {
            format!(
                "<tr style=\"border-bottom: 1px solid #eee;\">\
                 <td style=\"padding: 8px;\">{}</td>\
                 <td style=\"text-align: center; padding: 8px;\">{}</td>\
                 <td style=\"text-align: right; padding: 8px;\">{}</td>\
                 </tr>",
                item.name,
                item.quantity,
                amount(item.line_total().cents(), symbol),
            )
        })
        .collect()
}

fn shipping_address_block(order: &Order) -> String {
    let details = &order.customer_details;
    format!(
        "<h3 style=\"color: #333;\">Shipping Address:</h3>\
         <p style=\"margin: 10px 0;\">{}<br>{}<br>{}</p>",
        details.address, details.region, details.country,
    )
}

/// The confirmation email sent to the customer.
pub fn render_customer_confirmation(order: &Order, config: &StoreConfig) -> EmailMessage {
    let symbol = order.currency.symbol();
    let details = &order.customer_details;

    let html_body = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;\">\
         <div style=\"text-align: right; color: #666;\">\
         <p>Order #{order_id}</p>\
         <p>{date}</p>\
         </div>\
         <div style=\"margin: 30px 0;\">\
         <p>Dear {name},</p>\
         <p>Thank you for choosing {store}. We are writing to confirm that we have \
         received your order and are delighted to process it for you.</p>\
         <p>Below are the details of your purchase:</p>\
         <div style=\"background: #f9f9f9; padding: 15px; margin: 20px 0; border-radius: 5px;\">\
         <h3 style=\"color: #333; margin-bottom: 15px;\">Order Summary</h3>\
         <table style=\"width: 100%; border-collapse: collapse;\">\
         <thead><tr style=\"border-bottom: 1px solid #ddd;\">\
         <th style=\"text-align: left; padding: 8px;\">Item</th>\
         <th style=\"text-align: center; padding: 8px;\">Quantity</th>\
         <th style=\"text-align: right; padding: 8px;\">Price</th>\
         </tr></thead>\
         <tbody>{rows}\
         <tr><td colspan=\"2\" style=\"text-align: right; padding: 8px; font-weight: bold;\">Total:</td>\
         <td style=\"text-align: right; padding: 8px; font-weight: bold;\">{total}</td></tr>\
         </tbody></table></div>\
         <div style=\"margin: 20px 0;\">{address}</div>\
         <p>We will process your order promptly and notify you once it has been shipped. \
         If you have any questions about your order, please don't hesitate to contact \
         our customer service team.</p>\
         <p>Best regards,<br>The {store} Team</p>\
         </div>\
         <div style=\"margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; font-size: 12px; color: #666;\">\
         <p>This is an automated message, please do not reply to this email. \
         For any inquiries, please contact us at {support}</p>\
         </div></div>",
        order_id = order.order_id,
        date = order.date.format("%Y-%m-%d"),
        name = details.full_name(),
        store = config.store_name,
        rows = item_rows(order, symbol),
        total = amount(order.total_cents, symbol),
        address = shipping_address_block(order),
        support = config.support_email,
    );

    EmailMessage {
        recipients: vec![details.email.clone()],
        subject: format!("Your {} order #{}", config.store_name, order.order_id),
        html_body,
    }
}

/// The new-order notification sent to the store.
pub fn render_admin_notification(order: &Order, config: &StoreConfig) -> EmailMessage {
    let symbol = order.currency.symbol();
    let details = &order.customer_details;

    let html_body = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;\">\
         <h2>New Order Received - #{order_id}</h2>\
         <div style=\"margin: 20px 0;\">\
         <h3>Customer Details:</h3>\
         <p>Name: {name}</p>\
         <p>Email: {email}</p>\
         <p>Phone: {phone}</p>\
         </div>\
         <div style=\"margin: 20px 0;\">\
         <h3>Order Summary:</h3>\
         <table style=\"width: 100%; border-collapse: collapse;\">{rows}\
         <tr><td colspan=\"2\" style=\"text-align: right; font-weight: bold;\">Total:</td>\
         <td style=\"text-align: right; font-weight: bold;\">{total}</td></tr>\
         </table></div>\
         <div style=\"margin: 20px 0;\">{address}</div>\
         </div>",
        order_id = order.order_id,
        name = details.full_name(),
        email = details.email,
        phone = details.phone,
        rows = item_rows(order, symbol),
        total = amount(order.total_cents, symbol),
        address = shipping_address_block(order),
    );

    EmailMessage {
        recipients: vec![config.admin_email.clone()],
        subject: format!("New order #{} - {}", order.order_id, amount(order.total_cents, symbol)),
        html_body,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
