//! Razorpay Widget Bindings
//!
//! The hosted checkout widget lives in `checkout.js` loaded from the page,
//! exposed as a global `Razorpay` constructor. This module reaches it
//! through `js-sys` reflection and models the callback pair (completion
//! handler, modal dismiss) as a single awaitable outcome.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use checkout_core::WidgetOptions;

/// How the widget finished
#[derive(Clone, Debug)]
pub enum CheckoutOutcome {
    /// User completed payment; ids from the completion callback
    Completed(PaymentConfirmation),
    /// Modal closed without paying
    Dismissed,
}

/// Payment identifiers handed back by the completion callback
#[derive(Clone, Debug, Default)]
pub struct PaymentConfirmation {
    pub payment_id: Option<String>,
    pub signature: Option<String>,
}

/// Open the checkout widget and await its outcome.
///
/// Whichever callback fires first resolves the outcome; the widget keeps
/// the callbacks for the rest of the page's life, so they are leaked
/// rather than dropped.
pub async fn open_checkout(options: &WidgetOptions) -> Result<CheckoutOutcome, String> {
    let json = serde_json::to_string(options).map_err(|e| e.to_string())?;
    let js_options =
        js_sys::JSON::parse(&json).map_err(|_| "Widget options did not parse".to_string())?;

    let (tx, rx) = oneshot::channel();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let handler_tx = tx.clone();
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
        let confirmation = PaymentConfirmation {
            payment_id: string_field(&response, "razorpay_payment_id"),
            signature: string_field(&response, "razorpay_signature"),
        };
        if let Some(tx) = handler_tx.borrow_mut().take() {
            let _ = tx.send(CheckoutOutcome::Completed(confirmation));
        }
    });

    let dismiss_tx = tx.clone();
    let on_dismiss = Closure::<dyn FnMut()>::new(move || {
        if let Some(tx) = dismiss_tx.borrow_mut().take() {
            let _ = tx.send(CheckoutOutcome::Dismissed);
        }
    });

    js_sys::Reflect::set(&js_options, &"handler".into(), handler.as_ref())
        .map_err(|_| "Failed to attach completion handler".to_string())?;

    let modal = js_sys::Object::new();
    js_sys::Reflect::set(&modal, &"ondismiss".into(), on_dismiss.as_ref())
        .map_err(|_| "Failed to attach dismiss hook".to_string())?;
    js_sys::Reflect::set(&js_options, &"modal".into(), &modal)
        .map_err(|_| "Failed to attach dismiss hook".to_string())?;

    open_widget(&js_options)?;
    handler.forget();
    on_dismiss.forget();

    rx.await
        .map_err(|_| "Checkout widget closed unexpectedly".to_string())
}

/// `new Razorpay(options).open()` via the global constructor
fn open_widget(js_options: &JsValue) -> Result<(), String> {
    let constructor = js_sys::Reflect::get(&js_sys::global(), &"Razorpay".into())
        .ok()
        .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
        .ok_or_else(|| "Checkout widget script is not loaded".to_string())?;

    let widget =
        js_sys::Reflect::construct(&constructor, &js_sys::Array::of1(js_options))
            .map_err(|_| "Checkout widget failed to initialize".to_string())?;

    let open = js_sys::Reflect::get(&widget, &"open".into())
        .ok()
        .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
        .ok_or_else(|| "Checkout widget has no open method".to_string())?;

    open.call0(&widget)
        .map_err(|_| "Checkout widget failed to open".to_string())?;
    Ok(())
}

fn string_field(value: &JsValue, key: &str) -> Option<String> {
    js_sys::Reflect::get(value, &key.into())
        .ok()
        .and_then(|v| v.as_string())
}
