use std::sync::{Arc, Weak};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::condition::Condition;
use crate::config::GetuiConfig;
use crate::errors::{GetuiError, Result};
use crate::message::{AppMessage, ListMessage, Message, SingleMessage, TagMessage};
use crate::models::*;
use crate::target::{AliasBinding, BatchTask, Target, TargetList};
use crate::transport::{ApiRequest, HttpTransport, Method, Transport};
use crate::util::{request_id, sha256_hex, strip_nulls};

/// Getui REST Client
///
/// Owns the account credentials and the session token. Cloning is cheap and
/// every clone shares the same session.
///
/// The token is absent until [`GetuiClient::auth_sign`] succeeds. Signing
/// schedules a background re-sign before the token expires; a later sign
/// replaces that schedule and a successful [`GetuiClient::auth_close`]
/// cancels it.
#[derive(Clone)]
pub struct GetuiClient {
    inner: Arc<Session>,
}

struct Session {
    config: GetuiConfig,
    transport: Arc<dyn Transport>,
    auth_token: RwLock<Option<String>>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(handle) = self.refresh_task.get_mut().take() {
            handle.abort();
        }
    }
}

impl Session {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse> {
        let auth_token = self.auth_token.read().await.clone();

        debug!(
            method = method.as_str(),
            path = %path,
            authenticated = auth_token.is_some(),
            "Sending Getui request"
        );

        let value = self
            .transport
            .send(ApiRequest {
                method,
                path: path.to_string(),
                body,
                auth_token,
            })
            .await?;

        ApiResponse::from_value(value).map_err(|e| {
            if let GetuiError::Provider { result, .. } = &e {
                warn!(path = %path, result = %result, "Getui rejected request");
            }
            e
        })
    }

    async fn sign(&self) -> Result<()> {
        let timestamp = Utc::now().timestamp_millis();
        let sign = sha256_hex(&format!(
            "{}{}{}",
            self.config.app_key, timestamp, self.config.master_secret
        ));
        let body = SignRequest {
            sign,
            timestamp,
            appkey: &self.config.app_key,
        };

        let response = self
            .request(Method::Post, "/auth_sign", Some(serde_json::to_value(&body)?))
            .await?;
        let signed: SignResponse = serde_json::from_value(Value::Object(response.fields))
            .map_err(|e| {
                GetuiError::Validation(format!("auth_sign response has no auth_token: {}", e))
            })?;

        *self.auth_token.write().await = Some(signed.auth_token);
        info!(app_id = %self.config.app_id, "Getui auth token signed");
        Ok(())
    }
}

impl GetuiClient {
    /// Create a client talking to the Getui REST API over HTTP
    pub fn new(config: GetuiConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(config: GetuiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(Session {
                config,
                transport,
                auth_token: RwLock::new(None),
                refresh_task: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &GetuiConfig {
        &self.inner.config
    }

    /// Current session token, if signed
    pub async fn auth_token(&self) -> Option<String> {
        self.inner.auth_token.read().await.clone()
    }

    /// Sign in and schedule automatic re-signing
    ///
    /// `sign = sha256(appkey + timestamp_ms + master_secret)`. The token is
    /// stored before this returns, so every later request carries it.
    pub async fn auth_sign(&self) -> Result<()> {
        self.inner.sign().await?;
        self.schedule_refresh().await;
        Ok(())
    }

    async fn schedule_refresh(&self) {
        let weak: Weak<Session> = Arc::downgrade(&self.inner);
        let interval = self.inner.config.token_refresh_interval;

        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let Some(session) = weak.upgrade() else {
                    break;
                };
                if let Err(e) = session.sign().await {
                    error!(error = %e, "Scheduled Getui re-sign failed");
                }
            }
        });

        if let Some(previous) = self.inner.refresh_task.lock().await.replace(handle) {
            previous.abort();
        }
    }

    /// Invalidate the session token
    ///
    /// The local token is cleared only when the provider confirms; on any
    /// failure it is kept and the error returned.
    pub async fn auth_close(&self) -> Result<ApiResponse> {
        let response = self
            .inner
            .request(Method::Post, "/auth_close", Some(json!({})))
            .await?;

        if let Some(handle) = self.inner.refresh_task.lock().await.take() {
            handle.abort();
        }
        *self.inner.auth_token.write().await = None;
        info!(app_id = %self.inner.config.app_id, "Getui auth token closed");
        Ok(response)
    }

    /// Serialize a push body: message core with appkey, the template keyed
    /// by its type, push_info, plus whatever `fill` sets.
    ///
    /// Nulls are stripped from everything except `push_info`, whose custom
    /// payload is sent as the caller built it.
    fn push_body<'a, F>(&self, message: &Message, fill: F) -> Result<Value>
    where
        F: FnOnce(&mut PushBody<'a>),
    {
        let template = message.template().ok_or_else(|| {
            GetuiError::Validation("message has no template attached".to_string())
        })?;

        let mut data = message.serialized_core();
        data.appkey = Some(self.inner.config.app_key.clone());

        let mut body = PushBody {
            message: data,
            cid: None,
            alias: None,
            condition: None,
            tag: None,
            requestid: None,
            speed: None,
            task_name: None,
        };
        fill(&mut body);

        let mut value = serde_json::to_value(&body)?;
        if let Value::Object(map) = &mut value {
            map.insert(
                template.kind().as_str().to_string(),
                serde_json::to_value(template)?,
            );
        }
        strip_nulls(&mut value);

        if let (Value::Object(map), Some(push_info)) =
            (&mut value, message.serialized_push_info()?)
        {
            map.insert("push_info".to_string(), push_info);
        }
        Ok(value)
    }

    fn single_body(&self, message: &SingleMessage, target: &Target) -> Result<Value> {
        self.push_body(message, |body| {
            body.cid = target.cid.as_deref();
            body.alias = target.alias.as_deref();
            body.requestid = Some(request_id());
        })
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let mut body = serde_json::to_value(body)?;
        strip_nulls(&mut body);
        self.inner.request(Method::Post, path, Some(body)).await
    }

    async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.inner.request(Method::Get, path, None).await
    }

    /// Push to one user, addressed by cid or alias
    pub async fn push_message_to_single(
        &self,
        message: &SingleMessage,
        target: &Target,
    ) -> Result<ApiResponse> {
        let body = self.single_body(message, target)?;
        self.inner.request(Method::Post, "/push_single", Some(body)).await
    }

    /// Push different single messages in one call
    pub async fn push_message_to_single_batch(&self, batches: &[BatchTask]) -> Result<ApiResponse> {
        let msg_list = batches
            .iter()
            .map(|batch| self.single_body(&batch.message, &batch.target))
            .collect::<Result<Vec<_>>>()?;

        let body = serde_json::to_value(SingleBatchBody {
            msg_list,
            need_detail: true,
        })?;
        self.inner
            .request(Method::Post, "/push_single_batch", Some(body))
            .await
    }

    /// Broadcast to every app user matching the message conditions
    ///
    /// `speed` caps deliveries per second; 0 leaves it to the provider.
    pub async fn push_message_to_app(
        &self,
        message: &AppMessage,
        task_name: Option<&str>,
        speed: u32,
    ) -> Result<ApiResponse> {
        let condition = message.serialized_conditions()?;
        let body = self.push_body(&message.message, |body| {
            body.condition = Some(condition);
            body.requestid = Some(request_id());
            body.speed = Some(speed);
            body.task_name = task_name;
        })?;

        let response = self.inner.request(Method::Post, "/push_app", Some(body)).await?;
        info!(taskid = ?response.taskid(), "Getui app push accepted");
        Ok(response)
    }

    /// Broadcast to every user carrying the message tag
    pub async fn push_message_by_tag(
        &self,
        message: &TagMessage,
        task_name: Option<&str>,
        speed: u32,
    ) -> Result<ApiResponse> {
        let body = self.push_body(&message.message, |body| {
            body.tag = Some(message.tag.as_str());
            body.requestid = Some(request_id());
            body.speed = Some(speed);
            body.task_name = task_name;
        })?;

        self.inner.request(Method::Post, "/push_by_tag", Some(body)).await
    }

    /// Store a list message body and return the task id referencing it
    pub async fn save_list_body(
        &self,
        message: &ListMessage,
        task_name: Option<&str>,
    ) -> Result<String> {
        let body = self.push_body(message, |body| {
            body.task_name = task_name;
        })?;

        let response = self
            .inner
            .request(Method::Post, "/save_list_body", Some(body))
            .await?;

        response
            .taskid()
            .map(str::to_string)
            .ok_or_else(|| {
                GetuiError::Validation("save_list_body response has no taskid".to_string())
            })
    }

    /// Push one message to a cid or alias list
    ///
    /// Saves the body first; `/push_list` is only called once a task id
    /// came back.
    pub async fn push_message_to_list(
        &self,
        message: &ListMessage,
        list: &TargetList,
        task_name: Option<&str>,
    ) -> Result<ApiResponse> {
        let taskid = self.save_list_body(message, task_name).await?;

        self.post(
            "/push_list",
            &PushListBody {
                taskid: &taskid,
                cid: list.cid.as_deref(),
                alias: list.alias.as_deref(),
                need_detail: true,
            },
        )
        .await
    }

    /// Stop a task that is still being delivered
    pub async fn stop_task(&self, task_id: &str) -> Result<ApiResponse> {
        let path = format!("/stop_task/{}", urlencoding::encode(task_id));
        self.inner.request(Method::Delete, &path, None).await
    }

    pub async fn bind_alias(&self, bindings: &[AliasBinding]) -> Result<ApiResponse> {
        self.post("/bind_alias", &BindAliasBody { alias_list: bindings })
            .await
    }

    /// Alias bound to a cid
    pub async fn query_alias(&self, cid: &str) -> Result<ApiResponse> {
        self.get(&format!("/query_alias/{}", urlencoding::encode(cid)))
            .await
    }

    /// cids bound to an alias
    pub async fn query_cid(&self, alias: &str) -> Result<ApiResponse> {
        self.get(&format!("/query_cid/{}", urlencoding::encode(alias)))
            .await
    }

    pub async fn unbind_alias(&self, cid: &str, alias: &str) -> Result<ApiResponse> {
        self.post("/unbind_alias", &UnbindAliasBody { cid, alias })
            .await
    }

    /// Unbind every cid from an alias
    pub async fn unbind_alias_all(&self, alias: &str) -> Result<ApiResponse> {
        self.post(
            "/unbind_alias_all",
            &UnbindAliasAllBody {
                alias,
                requestid: request_id(),
            },
        )
        .await
    }

    /// Replace the tags of a cid
    pub async fn set_tags(&self, cid: &str, tags: &[String]) -> Result<ApiResponse> {
        self.post("/set_tags", &SetTagsBody { cid, tag_list: tags })
            .await
    }

    pub async fn get_tags(&self, cid: &str) -> Result<ApiResponse> {
        self.get(&format!("/get_tags/{}", urlencoding::encode(cid)))
            .await
    }

    /// Add cids to the user blacklist
    pub async fn add_black_users(&self, cids: &[String]) -> Result<ApiResponse> {
        self.post("/user_blk_list", &CidListBody { cid: cids }).await
    }

    /// Remove cids from the user blacklist
    pub async fn remove_black_users(&self, cids: &[String]) -> Result<ApiResponse> {
        let mut body = serde_json::to_value(CidListBody { cid: cids })?;
        strip_nulls(&mut body);
        self.inner
            .request(Method::Delete, "/user_blk_list", Some(body))
            .await
    }

    /// Online status of a cid
    pub async fn get_user_status(&self, cid: &str) -> Result<ApiResponse> {
        self.get(&format!("/user_status/{}", urlencoding::encode(cid)))
            .await
    }

    /// Delivery statistics for a set of tasks
    pub async fn get_push_result(&self, task_ids: &[String]) -> Result<ApiResponse> {
        self.post(
            "/push_result",
            &PushResultBody {
                task_id_list: task_ids,
            },
        )
        .await
    }

    /// User statistics for one day
    pub async fn query_app_user(&self, date: NaiveDate) -> Result<ApiResponse> {
        self.get(&format!("/query_app_user/{}", date.format("%Y%m%d")))
            .await
    }

    /// Push statistics for one day
    pub async fn query_app_push(&self, date: NaiveDate) -> Result<ApiResponse> {
        self.get(&format!("/query_app_push/{}", date.format("%Y%m%d")))
            .await
    }

    pub async fn set_badge(&self, request: &BadgeRequest) -> Result<ApiResponse> {
        self.post("/set_badge", request).await
    }

    /// Number of users matching all conditions
    pub async fn query_user_count(&self, conditions: &[Condition]) -> Result<ApiResponse> {
        self.post(
            "/query_user_count",
            &UserCountBody {
                condition: conditions,
            },
        )
        .await
    }

    pub async fn get_feedback_users(&self) -> Result<ApiResponse> {
        self.get("/get_feedback_users").await
    }

    /// Tags currently usable in conditions
    pub async fn get_valid_tags(&self) -> Result<ApiResponse> {
        self.get("/get_valid_tags").await
    }
}
