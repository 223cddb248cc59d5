//! End-to-end checks of the application with admission control

#[cfg(test)]
mod tests {
    use actix_web::dev::Service;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpMessage, HttpResponse, test, web};
    use release_ratelimit::server::middleware::{
        X_RATELIMIT_LIMIT, X_RATELIMIT_REMAINING, X_RATELIMIT_RESET,
    };
    use release_ratelimit::server::{AppState, create_app};
    use release_ratelimit::utils::error::ErrorResponse;
    use release_ratelimit::{Config, Principal, RateLimitConfig, RateLimitMiddleware};

    fn config(rate_limit: RateLimitConfig) -> Config {
        let mut config = Config::default();
        config.gateway.rate_limit = rate_limit;
        config
    }

    fn header(res: &actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>, name: &str) -> String {
        res.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[actix_web::test]
    async fn test_forwarded_clients_are_limited_independently() {
        // One token per minute so nothing refills while the test runs
        let state = AppState::new(config(RateLimitConfig {
            requests_per_minute: 1,
            burst: 2,
            ..Default::default()
        }))
        .unwrap();
        let limiters = state.limiters.clone();
        let app = test::init_service(create_app(web::Data::new(state))).await;

        let call = |ip: &'static str| {
            test::TestRequest::get()
                .uri("/api/v1/ping")
                .insert_header(("x-forwarded-for", ip))
                .to_request()
        };

        assert_eq!(test::call_service(&app, call("203.0.113.1")).await.status(), StatusCode::OK);
        assert_eq!(test::call_service(&app, call("203.0.113.1")).await.status(), StatusCode::OK);

        let res = test::call_service(&app, call("203.0.113.1")).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after: u64 = header(&res, "retry-after").parse().unwrap();
        assert!((50..=60).contains(&retry_after));
        assert_eq!(header(&res, X_RATELIMIT_LIMIT.as_str()), "1");
        assert_eq!(header(&res, X_RATELIMIT_REMAINING.as_str()), "0");
        assert!(!header(&res, X_RATELIMIT_RESET.as_str()).is_empty());

        let body: ErrorResponse = test::read_body_json(res).await;
        assert_eq!(body.error.code, "RATE_LIMIT_EXCEEDED");
        assert_eq!(body.error.message, "Rate limit exceeded");
        assert!(body.error.request_id.is_none());

        assert_eq!(test::call_service(&app, call("203.0.113.2")).await.status(), StatusCode::OK);
        assert_eq!(limiters.for_tier(release_ratelimit::Tier::Anonymous).len(), 2);
        limiters.close();
    }

    #[actix_web::test]
    async fn test_upstream_auth_layer_selects_authenticated_tier() {
        let state = AppState::new(config(RateLimitConfig {
            requests_per_minute: 1,
            burst: 1,
            authenticated_requests_per_minute: Some(1),
            authenticated_burst: Some(20),
            ..Default::default()
        }))
        .unwrap();
        let limiters = state.limiters.clone();

        let app = test::init_service(
            App::new()
                .wrap(RateLimitMiddleware::new(limiters.clone()))
                .wrap_fn(|req, srv| {
                    if let Some(token) = req
                        .headers()
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.strip_prefix("Bearer "))
                        .map(str::to_string)
                    {
                        req.extensions_mut().insert(Principal::new(token));
                    }
                    srv.call(req)
                })
                .route("/updates", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let anonymous = || {
            test::TestRequest::get()
                .uri("/updates")
                .peer_addr("198.51.100.7:443".parse().unwrap())
                .to_request()
        };
        assert_eq!(test::call_service(&app, anonymous()).await.status(), StatusCode::OK);
        assert_eq!(
            test::call_service(&app, anonymous()).await.status(),
            StatusCode::TOO_MANY_REQUESTS
        );

        for expected in (0..20).rev() {
            let req = test::TestRequest::get()
                .uri("/updates")
                .peer_addr("198.51.100.7:443".parse().unwrap())
                .insert_header(("authorization", "Bearer ci-runner"))
                .to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(header(&res, "x-ratelimit-limit"), "1");
            assert_eq!(header(&res, "x-ratelimit-remaining"), expected.to_string());
        }

        limiters.close();
    }
}
