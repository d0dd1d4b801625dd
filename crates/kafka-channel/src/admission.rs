//! Mutating admission for KafkaChannel.
//!
//! Pure functions from an `AdmissionReview` to the review carrying the
//! defaulting patch. Serving them over HTTPS is left to the webhook host.

use json_patch::Patch;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use kube::core::DynamicObject;
use kube::ResourceExt;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::crds::KafkaChannel;
use crate::defaulting::DefaultingContext;
use crate::error::{Error, Result};

/// RFC 6902 patch that takes `channel` to its defaulted form.
pub fn default_patch(channel: &KafkaChannel, ctx: &DefaultingContext) -> Result<Patch> {
    patch_for(channel, true, ctx)
}

/// When the request carried no `spec`, the patch is computed against the
/// object without one so that it adds `/spec` wholesale.
fn patch_for(channel: &KafkaChannel, spec_in_request: bool, ctx: &DefaultingContext) -> Result<Patch> {
    let mut before = serde_json::to_value(channel)?;
    if !spec_in_request {
        if let Some(object) = before.as_object_mut() {
            object.remove("spec");
        }
    }
    let after = serde_json::to_value(channel.defaulted(ctx))?;
    Ok(json_patch::diff(&before, &after))
}

/// Build the admission response for a single request.
///
/// Requests without an object (deletes, connects) are allowed unchanged.
pub fn mutate(req: &AdmissionRequest<KafkaChannel>, ctx: &DefaultingContext) -> AdmissionResponse {
    respond(req, true, ctx)
}

fn respond(
    req: &AdmissionRequest<KafkaChannel>,
    spec_in_request: bool,
    ctx: &DefaultingContext,
) -> AdmissionResponse {
    let response = AdmissionResponse::from(req);

    let channel = match (&req.operation, req.object.as_ref()) {
        (Operation::Create | Operation::Update, Some(channel)) => channel,
        (op, _) => {
            debug!(uid = %req.uid, operation = ?op, "Nothing to default");
            return response;
        }
    };

    let patch = match patch_for(channel, spec_in_request, ctx) {
        Ok(patch) => patch,
        Err(e) => {
            warn!(uid = %req.uid, name = %channel.name_any(), "Failed to build defaulting patch: {e}");
            return response.deny(e.to_string());
        }
    };

    info!(
        uid = %req.uid,
        name = %channel.name_any(),
        namespace = %channel.namespace().unwrap_or_default(),
        operations = patch.0.len(),
        "Defaulted KafkaChannel"
    );

    match response.with_patch(patch) {
        Ok(response) => response,
        Err(e) => {
            let e = Error::Admission(e.to_string());
            warn!(uid = %req.uid, "{e}");
            AdmissionResponse::from(req).deny(e.to_string())
        }
    }
}

/// Answer a full admission review.
pub fn review(
    review: AdmissionReview<KafkaChannel>,
    ctx: &DefaultingContext,
) -> AdmissionReview<DynamicObject> {
    answer(review, true, ctx)
}

fn answer(
    review: AdmissionReview<KafkaChannel>,
    spec_in_request: bool,
    ctx: &DefaultingContext,
) -> AdmissionReview<DynamicObject> {
    let req: AdmissionRequest<KafkaChannel> = match review.try_into() {
        Ok(req) => req,
        Err(e) => {
            warn!("Invalid admission review: {e}");
            return AdmissionResponse::invalid(e.to_string()).into_review();
        }
    };
    respond(&req, spec_in_request, ctx).into_review()
}

/// Decode a JSON request body and answer it.
///
/// A channel sent without `spec` is decoded with an empty one and defaulted
/// like any other.
pub fn review_json(body: &[u8], ctx: &DefaultingContext) -> Result<AdmissionReview<DynamicObject>> {
    let mut raw: Value = serde_json::from_slice(body)?;
    let spec_in_request = fill_missing_spec(&mut raw);
    let parsed: AdmissionReview<KafkaChannel> = serde_json::from_value(raw)?;
    Ok(answer(parsed, spec_in_request, ctx))
}

/// Insert an empty `spec` into the request objects that lack one. Returns
/// whether `request.object` already had a spec.
fn fill_missing_spec(review: &mut Value) -> bool {
    let mut object_had_spec = true;
    for pointer in ["/request/object", "/request/oldObject"] {
        let Some(object) = review.pointer_mut(pointer).and_then(Value::as_object_mut) else {
            continue;
        };
        if object.get("spec").is_some_and(|spec| !spec.is_null()) {
            continue;
        }
        object.insert("spec".to_string(), Value::Object(Map::new()));
        if pointer == "/request/object" {
            object_had_spec = false;
        }
    }
    object_had_spec
}
