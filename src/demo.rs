//! Demonstration application served by the `switchyard` binary.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use crate::http::response::Response;
use crate::http::templates::Templates;
use crate::middleware::builtin::RequestLog;
use crate::middleware::{Interceptor, MiddlewareChain};
use crate::routing::{Resource, Router};

#[derive(Serialize)]
struct UserPost<'a> {
    user_id: &'a str,
    post_id: &'a str,
    message: String,
}

/// Register the demo routes on `router`.
pub fn register(router: &Router, templates: Option<Arc<Templates>>) {
    let view = Resource::new("ExampleView")
        .get(|_| Ok(Response::text("Hello from ExampleView!")))
        .post(|_| Ok(Response::text("POST request received in ExampleView!")))
        .put(|_| Ok(Response::text("PUT request processed in ExampleView!")))
        .delete(|_| Ok(Response::text("DELETE request processed in ExampleView!")));
    router.resource("/example", &view, MiddlewareChain::new().with(Interceptor::new(RequestLog)));

    router
        .get("/hello")
        .middleware(Interceptor::new(RequestLog))
        .to("hello_get", |_| Ok(Response::text("GET Hello from switchyard!")));
    router.post("/hello").to("hello_post", |_| Ok(Response::text("POST Hello received!")));
    router.put("/hello").to("hello_put", |_| Ok(Response::text("PUT Hello update!")));
    router.delete("/hello").to("hello_delete", |_| Ok(Response::text("DELETE Hello removed!")));

    router.get("/json-example").to("json_example", |_| {
        Response::json(&json!({"message": "Hello from JSON!", "status": "success"}))
    });

    router.get("/meow/{id}").to("meow", |ctx| {
        Response::json(&json!({
            "message": "switchyard is running!",
            "meow_id": ctx.param("id").unwrap_or("unknown"),
            "status": "success",
        }))
    });

    router.get("/users/{user_id}/posts/{post_id}").to("get_user_post", |ctx| {
        let user_id = ctx.param("user_id").unwrap_or("unknown");
        let post_id = ctx.param("post_id").unwrap_or("unknown");
        Response::json(&UserPost {
            user_id,
            post_id,
            message: format!("Fetching post {post_id} for user {user_id}"),
        })
    });

    match templates {
        Some(templates) if templates.has("example") => {
            router.get("/").to("index", move |_| {
                templates.render(
                    "example",
                    &json!({
                        "title": "Welcome to switchyard",
                        "description": "A small request dispatcher with routes, middleware and static files.",
                    }),
                )
            });
        }
        _ => tracing::info!("No 'example' template, keeping the default root handler"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::http::request::RequestContext;
    use axum::http::{Method, StatusCode};

    #[test]
    fn demo_routes_answer() {
        let router = Arc::new(Router::new());
        register(&router, None);
        let dispatcher = Dispatcher::new(router);

        let resp = dispatcher.handle(RequestContext::new(Method::GET, "/users/7/posts/42"));
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["user_id"], "7");
        assert_eq!(body["message"], "Fetching post 42 for user 7");

        let resp = dispatcher.handle(RequestContext::new(Method::DELETE, "/example"));
        assert_eq!(resp.body_text(), "DELETE request processed in ExampleView!");

        let resp = dispatcher.handle(RequestContext::new(Method::GET, "/"));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.body_text(), "switchyard is running");
    }
}
