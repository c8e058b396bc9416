/*!
 * 速率限制中间件
 *
 * 按固定时间窗口统计请求次数，用于登录、注册、密码重置和文件上传等端点。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RateLimit;
 *
 * App::new()
 *     .service(
 *         web::resource("/api/v1/auth/login")
 *             .wrap(RateLimit::login())  // 5次/分钟
 *             .route(web::post().to(login_handler))
 *     )
 * ```
 *
 * ## 限制规则
 *
 * - 已认证请求按用户 ID 计数，否则按客户端 IP 计数
 * - 窗口从第一次请求开始计时，窗口结束后计数清零
 * - 超过限制返回 429 Too Many Requests 与 Retry-After 头
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

pub const RATE_LIMIT_MESSAGE: &str = "Too many failed attempts. Please try again later.";

/// 单个限制键的计数窗口
#[derive(Clone, Copy, Debug)]
struct Window {
    started: Instant,
    count: u32,
}

/// 全局速率限制缓存
/// 键: 前缀:标识，值: 当前窗口
static RATE_LIMIT_CACHE: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

/// 单个端点的限额：`window_secs` 秒内最多 `max_requests` 次，
/// 不同端点用 `key_prefix` 分开计数
#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 注册：3次/分钟/IP
    pub fn signup() -> Self {
        Self::new(3, 60).with_prefix("signup")
    }

    /// 密码重置：3次/分钟/IP
    pub fn password_reset() -> Self {
        Self::new(3, 60).with_prefix("password_reset")
    }

    /// 文件上传：10次/分钟/用户
    pub fn file_upload() -> Self {
        Self::new(10, 60).with_prefix("upload")
    }
}

/// 记录一次请求，返回 (是否允许, 本窗口已用次数, 窗口剩余秒数)
async fn hit(key: &str, max_requests: u32, window: Duration) -> (bool, u32, u64) {
    let now = Instant::now();
    let entry = RATE_LIMIT_CACHE
        .entry(key.to_string())
        .and_upsert_with(|existing| {
            let next = match existing.map(|e| e.into_value()) {
                Some(w) if now.duration_since(w.started) < window => Window {
                    started: w.started,
                    count: w.count.saturating_add(1),
                },
                _ => Window {
                    started: now,
                    count: 1,
                },
            };
            std::future::ready(next)
        })
        .await;

    let current = entry.into_value();
    let retry_after = window
        .saturating_sub(now.duration_since(current.started))
        .as_secs()
        .max(1);
    (current.count <= max_requests, current.count, retry_after)
}

/// 限制键：已认证请求按账号，否则按客户端 IP
fn limit_key(req: &ServiceRequest, prefix: &str) -> String {
    let identifier = match req.extensions().get::<User>() {
        Some(user) => format!("user:{}", user.id),
        None => format!("ip:{}", client_ip(req)),
    };
    if prefix.is_empty() {
        identifier
    } else {
        format!("{prefix}:{identifier}")
    }
}

fn header_str<'a>(req: &'a ServiceRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// 客户端 IP，优先取代理头，最后退回到对端地址
fn client_ip(req: &ServiceRequest) -> String {
    let peer = req.peer_addr().map(|addr| addr.ip().to_string());
    pick_client_ip(
        header_str(req, "X-Forwarded-For"),
        header_str(req, "X-Real-IP"),
        peer.as_deref(),
    )
}

// X-Forwarded-For 只看第一个地址（最接近客户端）
fn pick_client_ip(forwarded: Option<&str>, real_ip: Option<&str>, peer: Option<&str>) -> String {
    forwarded
        .and_then(|value| value.split(',').next())
        .into_iter()
        .chain(real_ip)
        .chain(peer)
        .map(str::trim)
        .find(|ip| ip.parse::<IpAddr>().is_ok())
        .unwrap_or("unknown")
        .to_string()
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            RATE_LIMIT_MESSAGE,
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let max_requests = limit.max_requests;
            let cache_key = limit_key(&req, &limit.key_prefix);
            let window = Duration::from_secs(limit.window_secs);

            let (allowed, count, retry_after) = hit(&cache_key, max_requests, window).await;
            if !allowed {
                warn!(
                    "Rate limit exceeded for key: {} (count: {}/{})",
                    cache_key, count, max_requests
                );
                return Ok(req.into_response(
                    create_rate_limit_response(retry_after).map_into_right_body(),
                ));
            }

            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(max_requests),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(max_requests.saturating_sub(count)),
            );
            Ok(res.map_into_left_body())
        })
    }
}
