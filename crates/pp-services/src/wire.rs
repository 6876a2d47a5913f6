//! JSON shapes spoken by the backend proxy.
//!
//! The proxy forwards the generator's own envelopes, so create-task
//! replies look like `{"code": 200, "msg": "success", "data": {"taskId": ...}}`
//! and status replies carry the result list as a JSON *string* in
//! `data.resultJson`.

use crate::error::{ServiceError, ServiceResult};
use crate::generation::{DEFAULT_MODEL, DEFAULT_RESOLUTION, GenerationRequest, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

const CODE_OK: i64 = 200;

// ─── Requests ────────────────────────────────────────────────────────────

/// Body for `POST /generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTaskBody<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub aspect_ratio: &'a str,
    pub resolution: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_input: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_url: Option<&'a str>,
}

impl<'a> CreateTaskBody<'a> {
    /// `nano-banana-pro` takes a list of reference images and an explicit
    /// output format; image-to-image models take a single `input_url`.
    pub fn for_request(request: &'a GenerationRequest) -> Self {
        let nano = request.model == DEFAULT_MODEL;
        Self {
            model: &request.model,
            prompt: &request.prompt,
            aspect_ratio: &request.aspect_ratio,
            resolution: DEFAULT_RESOLUTION,
            image_input: nano.then(|| vec![request.reference_url.as_str()]),
            output_format: nano.then_some("png"),
            input_url: (!nano).then_some(request.reference_url.as_str()),
        }
    }
}

pub fn encode_create_task(request: &GenerationRequest) -> ServiceResult<String> {
    Ok(serde_json::to_string(&CreateTaskBody::for_request(request))?)
}

// ─── Responses ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<CreateTaskData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskData {
    pub task_id: Option<String>,
    pub record_id: Option<String>,
}

impl CreateTaskResponse {
    /// The task id, accepting either `taskId` or the older `recordId`.
    pub fn into_task_id(self) -> ServiceResult<TaskId> {
        if let Some(code) = self.code
            && code != CODE_OK
        {
            return Err(ServiceError::Rejected {
                code,
                message: self.msg.unwrap_or_default(),
            });
        }
        self.data
            .and_then(|d| d.task_id.or(d.record_id))
            .filter(|id| !id.is_empty())
            .map(TaskId::new)
            .ok_or(ServiceError::MissingTaskId)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub data: StatusData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusData {
    pub state: Option<String>,
    pub result_json: Option<String>,
    pub fail_msg: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultJson {
    #[serde(default)]
    result_urls: Vec<String>,
}

impl StatusResponse {
    /// Map the generator's state string to a [`TaskStatus`]. Anything
    /// other than `success` or `fail` (`waiting`, `queuing`, `generating`)
    /// is still pending.
    pub fn into_status(self) -> TaskStatus {
        let data = self.data;
        match data.state.as_deref() {
            Some("success") => {
                let urls = data
                    .result_json
                    .as_deref()
                    .filter(|raw| !raw.is_empty())
                    .map(|raw| match serde_json::from_str::<ResultJson>(raw) {
                        Ok(parsed) => parsed.result_urls,
                        Err(e) => {
                            log::warn!("unreadable resultJson: {e}");
                            Vec::new()
                        }
                    })
                    .unwrap_or_default();
                TaskStatus::Success(urls)
            }
            Some("fail") => TaskStatus::Fail(
                data.fail_msg
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "generation failed".to_string()),
            ),
            _ => TaskStatus::Pending,
        }
    }
}

pub fn decode_create_task(body: &str) -> ServiceResult<TaskId> {
    serde_json::from_str::<CreateTaskResponse>(body)?.into_task_id()
}

pub fn decode_status(body: &str) -> ServiceResult<TaskStatus> {
    Ok(serde_json::from_str::<StatusResponse>(body)?.into_status())
}

/// Body of `POST /upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

pub fn decode_upload(body: &str) -> ServiceResult<String> {
    let url = serde_json::from_str::<UploadResponse>(body)?.url;
    if url.is_empty() {
        return Err(ServiceError::Upload("empty url".into()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn task_id_or_record_id() {
        let id = decode_create_task(r#"{"code":200,"msg":"success","data":{"taskId":"t1"}}"#);
        assert_eq!(id.unwrap(), TaskId::new("t1"));
        let id = decode_create_task(r#"{"data":{"recordId":"r9"}}"#);
        assert_eq!(id.unwrap(), TaskId::new("r9"));
    }

    #[test]
    fn rejected_and_missing_ids() {
        let err = decode_create_task(r#"{"code":402,"msg":"Insufficient credits"}"#).unwrap_err();
        assert!(matches!(err, ServiceError::Rejected { code: 402, .. }));
        let err = decode_create_task(r#"{"code":200,"data":{}}"#).unwrap_err();
        assert!(matches!(err, ServiceError::MissingTaskId));
    }

    #[test]
    fn status_success_unpacks_result_json() {
        let body = json!({
            "data": {
                "state": "success",
                "resultJson": "{\"resultUrls\":[\"https://cdn/out.png\"]}"
            }
        })
        .to_string();
        assert_eq!(
            decode_status(&body).unwrap(),
            TaskStatus::Success(vec!["https://cdn/out.png".into()])
        );
    }

    #[test]
    fn status_fail_and_pending() {
        let fail = decode_status(r#"{"data":{"state":"fail","failMsg":"invalid image format"}}"#);
        assert_eq!(fail.unwrap(), TaskStatus::Fail("invalid image format".into()));
        let pending = decode_status(r#"{"data":{"state":"generating"}}"#);
        assert_eq!(pending.unwrap(), TaskStatus::Pending);
        assert_eq!(decode_status("{}").unwrap(), TaskStatus::Pending);
    }

    #[test]
    fn request_body_per_model() {
        let nano = GenerationRequest::new("marble", "https://x/ref.png", "1:1");
        let v: serde_json::Value = serde_json::from_str(&encode_create_task(&nano).unwrap()).unwrap();
        assert_eq!(v["image_input"], json!(["https://x/ref.png"]));
        assert_eq!(v["output_format"], "png");
        assert!(v.get("input_url").is_none());

        let flux = nano.clone().with_model("flux-2/pro-image-to-image");
        let v: serde_json::Value = serde_json::from_str(&encode_create_task(&flux).unwrap()).unwrap();
        assert_eq!(v["input_url"], "https://x/ref.png");
        assert!(v.get("image_input").is_none());
        assert_eq!(v["resolution"], "1K");
    }

    #[test]
    fn upload_reply_needs_a_url() {
        assert_eq!(
            decode_upload(r#"{"url":"https://files.example/ref.png"}"#).unwrap(),
            "https://files.example/ref.png"
        );
        assert!(matches!(decode_upload(r#"{"url":""}"#), Err(ServiceError::Upload(_))));
        assert!(matches!(decode_upload("{}"), Err(ServiceError::Json(_))));
    }
}
