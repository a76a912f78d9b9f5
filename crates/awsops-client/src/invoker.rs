//! Operation invoker and pagination
//!
//! [`Paginator`] is a small state machine over one operation's pages:
//!
//! ```text
//! AwaitingFirstPage --call--> HasNextToken(t) --call--> ... --> Done
//!                       \--(no token / single page / error)--> Done
//! ```
//!
//! [`Invoker::run`] drives it, hands every page to a sink as soon as it
//! arrives, and races each in-flight call against the cancel signal. No call
//! is ever retried; an error ends iteration and pages already handed to the
//! sink stay delivered.

use crate::cancel::CancelSignal;
use crate::error::InvokeError;
use crate::service::ApiClient;
use awsops_core::{
    build_request, BoundParameters, OperationDescriptor, RequestEnvelope, ResponseEnvelope,
};
use tracing::{debug, info, instrument, warn};

type Result<T> = std::result::Result<T, InvokeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    AwaitingFirstPage,
    HasNextToken(String),
    Done,
}

pub struct Paginator<'a, C: ApiClient + ?Sized> {
    client: &'a C,
    op: &'static OperationDescriptor,
    request: RequestEnvelope,
    token_path: Option<&'static str>,
    output_token: Option<&'static str>,
    auto_iterate: bool,
    state: PageState,
    pages: usize,
    last_token: Option<String>,
}

impl<'a, C: ApiClient + ?Sized> Paginator<'a, C> {
    /// Build the first request for `op`
    ///
    /// Auto-iteration is turned off when the caller supplied the token
    /// parameter themselves.
    pub fn new(
        client: &'a C,
        op: &'static OperationDescriptor,
        bound: &BoundParameters,
        auto_iterate: bool,
    ) -> Result<Self> {
        let request = build_request(op, bound)?;
        let token_param = op.token_param();
        let explicit_token = token_param.is_some_and(|p| bound.contains(p.name));

        if explicit_token && auto_iterate {
            debug!(
                operation = %op.qualified_name(),
                "continuation token supplied; fetching a single page"
            );
        }

        Ok(Self {
            client,
            op,
            request,
            token_path: token_param.map(|p| p.path),
            output_token: op.pagination.map(|p| p.output_token),
            auto_iterate: auto_iterate && !explicit_token,
            state: PageState::AwaitingFirstPage,
            pages: 0,
            last_token: None,
        })
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Pages fetched so far
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Token returned by the most recent page, even when not followed
    pub fn last_token(&self) -> Option<&str> {
        self.last_token.as_deref()
    }

    pub fn is_done(&self) -> bool {
        self.state == PageState::Done
    }

    /// Fetch the next page; `Ok(None)` once iteration is over
    pub async fn next_page(&mut self) -> Result<Option<ResponseEnvelope>> {
        let token = match &self.state {
            PageState::Done => return Ok(None),
            PageState::AwaitingFirstPage => None,
            PageState::HasNextToken(token) => Some(token.clone()),
        };

        if let (Some(token), Some(path)) = (&token, self.token_path) {
            self.request.set_token(path, token);
        }

        let response = match self.client.call(self.op, &self.request).await {
            Ok(response) => response,
            Err(e) => {
                self.state = PageState::Done;
                return Err(e);
            }
        };

        self.pages += 1;
        let next = self
            .output_token
            .and_then(|wire| response.next_token(wire))
            .map(str::to_string);
        self.last_token = next.clone();

        self.state = match next {
            Some(next) if self.auto_iterate => {
                if token.as_deref() == Some(next.as_str()) {
                    warn!(
                        operation = %self.op.qualified_name(),
                        page = self.pages,
                        "service returned the same continuation token twice; stopping"
                    );
                    PageState::Done
                } else {
                    PageState::HasNextToken(next)
                }
            }
            _ => PageState::Done,
        };

        debug!(
            operation = %self.op.qualified_name(),
            page = self.pages,
            more = !self.is_done(),
            "received page"
        );

        Ok(Some(response))
    }
}

#[derive(Debug, Clone)]
pub struct InvokeOptions {
    /// Follow continuation tokens until the service stops returning one
    pub auto_iterate: bool,
    pub cancel: CancelSignal,
}

impl Default for InvokeOptions {
    fn default() -> Self {
        Self {
            auto_iterate: true,
            cancel: CancelSignal::never(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeSummary {
    pub pages: usize,
    /// Token for resuming iteration, when the last page carried one
    pub next_token: Option<String>,
}

pub struct Invoker<C> {
    client: C,
}

impl<C: ApiClient> Invoker<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn paginate(
        &self,
        op: &'static OperationDescriptor,
        bound: &BoundParameters,
        auto_iterate: bool,
    ) -> Result<Paginator<'_, C>> {
        Paginator::new(&self.client, op, bound, auto_iterate)
    }

    /// Invoke `op`, handing each page to `sink` as it arrives
    #[instrument(name = "invoke", skip_all, fields(operation = %op.qualified_name()))]
    pub async fn run<F>(
        &self,
        op: &'static OperationDescriptor,
        bound: &BoundParameters,
        options: InvokeOptions,
        mut sink: F,
    ) -> Result<InvokeSummary>
    where
        F: FnMut(ResponseEnvelope) + Send,
    {
        let mut paginator = self.paginate(op, bound, options.auto_iterate)?;
        let mut cancel = options.cancel;

        while !paginator.is_done() {
            let page = if cancel.is_cancelled() {
                None
            } else {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => None,
                    result = paginator.next_page() => Some(result),
                }
            };

            match page {
                None => {
                    info!(pages = paginator.pages(), "operation cancelled");
                    return Err(InvokeError::Cancelled {
                        operation: op.qualified_name(),
                        pages: paginator.pages(),
                    });
                }
                Some(Ok(Some(response))) => sink(response),
                Some(Ok(None)) => break,
                Some(Err(e)) => return Err(e),
            }
        }

        let summary = InvokeSummary {
            pages: paginator.pages(),
            next_token: paginator.last_token().map(str::to_string),
        };
        info!(pages = summary.pages, "operation complete");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::cancel_pair;
    use async_trait::async_trait;
    use awsops_core::{bind, FieldKind, OutputField, Pagination, ParamSpec, Protocol, ServiceDescriptor};
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use std::time::Duration;

    static KEYSPACES: ServiceDescriptor = ServiceDescriptor {
        name: "keyspaces",
        title: "Amazon Keyspaces",
        signing_name: "cassandra",
        endpoint_prefix: "cassandra",
        protocol: Protocol::AwsJson1_0 {
            target_prefix: "KeyspacesService",
        },
    };

    static LIST_KEYSPACES: OperationDescriptor = OperationDescriptor {
        service: &KEYSPACES,
        name: "ListKeyspaces",
        default_selector: "Keyspaces",
        pagination: Some(Pagination {
            token_param: "NextToken",
            output_token: "nextToken",
        }),
        params: &[
            ParamSpec::integer("MaxResult", "maxResults").aliases(&["MaxResults"]),
            ParamSpec::string("NextToken", "nextToken"),
        ],
        outputs: &[
            OutputField::new("Keyspaces", "keyspaces", FieldKind::List),
            OutputField::new("NextToken", "nextToken", FieldKind::String),
        ],
    };

    static DELETE_KEYSPACE: OperationDescriptor = OperationDescriptor {
        service: &KEYSPACES,
        name: "DeleteKeyspace",
        default_selector: "*",
        pagination: None,
        params: &[ParamSpec::string("KeyspaceName", "keyspaceName").required()],
        outputs: &[],
    };

    /// Replays canned results; blocks forever once they run out
    struct MockApiClient {
        responses: Mutex<Vec<Result<Value>>>,
        requests: Mutex<Vec<Value>>,
    }

    impl MockApiClient {
        fn new(responses: Vec<Result<Value>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<Value> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApiClient for MockApiClient {
        async fn call(
            &self,
            _op: &'static OperationDescriptor,
            request: &RequestEnvelope,
        ) -> Result<ResponseEnvelope> {
            self.requests
                .lock()
                .unwrap()
                .push(request.clone().into_value());
            let next = {
                let mut responses = self.responses.lock().unwrap();
                (!responses.is_empty()).then(|| responses.remove(0))
            };
            match next {
                Some(result) => result.map(ResponseEnvelope::new),
                None => std::future::pending().await,
            }
        }
    }

    fn page(names: &[&str], token: &str) -> Result<Value> {
        Ok(json!({
            "keyspaces": names.iter().map(|n| json!({"keyspaceName": n})).collect::<Vec<_>>(),
            "nextToken": token,
        }))
    }

    fn service_error() -> InvokeError {
        InvokeError::Service {
            operation: "keyspaces:ListKeyspaces".into(),
            status: 500,
            code: "InternalServerException".into(),
            message: "boom".into(),
            request_id: None,
        }
    }

    fn no_params(op: &'static OperationDescriptor) -> BoundParameters {
        bind(op, Vec::<(&str, Value)>::new()).unwrap()
    }

    async fn run_collect(
        invoker: &Invoker<MockApiClient>,
        bound: &BoundParameters,
        options: InvokeOptions,
    ) -> (Result<InvokeSummary>, Vec<ResponseEnvelope>) {
        let mut pages = Vec::new();
        let result = invoker
            .run(&LIST_KEYSPACES, bound, options, |p| pages.push(p))
            .await;
        (result, pages)
    }

    #[tokio::test]
    async fn test_three_tokens_yield_three_pages() {
        let invoker = Invoker::new(MockApiClient::new(vec![
            page(&["a1"], "a"),
            page(&["b1"], "b"),
            page(&["c1"], ""),
        ]));

        let (result, pages) =
            run_collect(&invoker, &no_params(&LIST_KEYSPACES), InvokeOptions::default()).await;
        let summary = result.unwrap();

        assert_eq!(summary.pages, 3);
        assert_eq!(summary.next_token, None);
        assert_eq!(pages.len(), 3);

        let requests = invoker.client().requests();
        assert_eq!(requests, vec![json!({}), json!({"nextToken": "a"}), json!({"nextToken": "b"})]);
    }

    #[tokio::test]
    async fn test_missing_token_member_ends_iteration() {
        let invoker = Invoker::new(MockApiClient::new(vec![Ok(json!({"keyspaces": []}))]));
        let (result, pages) =
            run_collect(&invoker, &no_params(&LIST_KEYSPACES), InvokeOptions::default()).await;
        assert_eq!(result.unwrap().pages, 1);
        assert_eq!(pages.len(), 1);
    }

    #[tokio::test]
    async fn test_error_on_second_page_keeps_first() {
        let invoker = Invoker::new(MockApiClient::new(vec![
            page(&["a1"], "a"),
            Err(service_error()),
            page(&["never"], ""),
        ]));

        let (result, pages) =
            run_collect(&invoker, &no_params(&LIST_KEYSPACES), InvokeOptions::default()).await;

        assert_eq!(result.unwrap_err().error_code(), "InternalServerException");
        assert_eq!(pages.len(), 1);
        assert_eq!(invoker.client().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_no_auto_iterate_fetches_single_page() {
        let invoker = Invoker::new(MockApiClient::new(vec![page(&["a1"], "a"), page(&[], "")]));
        let options = InvokeOptions {
            auto_iterate: false,
            ..Default::default()
        };

        let (result, pages) = run_collect(&invoker, &no_params(&LIST_KEYSPACES), options).await;
        let summary = result.unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(summary.next_token.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_explicit_token_disables_auto_iteration() {
        let invoker = Invoker::new(MockApiClient::new(vec![page(&["b1"], "b"), page(&[], "")]));
        let bound = bind(&LIST_KEYSPACES, vec![("NextToken", json!("a"))]).unwrap();

        let (result, pages) = run_collect(&invoker, &bound, InvokeOptions::default()).await;

        assert_eq!(result.unwrap().next_token.as_deref(), Some("b"));
        assert_eq!(pages.len(), 1);
        assert_eq!(invoker.client().requests(), vec![json!({"nextToken": "a"})]);
    }

    #[tokio::test]
    async fn test_repeated_token_stops_loop() {
        let invoker = Invoker::new(MockApiClient::new(vec![
            page(&["a1"], "a"),
            page(&["a1"], "a"),
            page(&["a1"], "a"),
        ]));
        let (result, pages) =
            run_collect(&invoker, &no_params(&LIST_KEYSPACES), InvokeOptions::default()).await;
        assert_eq!(result.unwrap().pages, 2);
        assert_eq!(pages.len(), 2);
    }

    #[tokio::test]
    async fn test_non_paginated_operation_calls_once() {
        let invoker = Invoker::new(MockApiClient::new(vec![Ok(json!({"nextToken": "ignored"}))]));
        let bound = bind(&DELETE_KEYSPACE, vec![("KeyspaceName", json!("ks1"))]).unwrap();

        let mut pages = Vec::new();
        let summary = invoker
            .run(&DELETE_KEYSPACE, &bound, InvokeOptions::default(), |p| pages.push(p))
            .await
            .unwrap();

        assert_eq!(summary.pages, 1);
        assert_eq!(summary.next_token, None);
        assert_eq!(invoker.client().requests(), vec![json!({"keyspaceName": "ks1"})]);
    }

    #[tokio::test]
    async fn test_paginator_state_transitions() {
        let client = MockApiClient::new(vec![page(&["a1"], "a"), page(&[], "")]);
        let bound = no_params(&LIST_KEYSPACES);
        let mut paginator = Paginator::new(&client, &LIST_KEYSPACES, &bound, true).unwrap();

        assert_eq!(paginator.state(), &PageState::AwaitingFirstPage);
        assert!(paginator.next_page().await.unwrap().is_some());
        assert_eq!(paginator.state(), &PageState::HasNextToken("a".into()));
        assert!(paginator.next_page().await.unwrap().is_some());
        assert!(paginator.is_done());
        assert!(paginator.next_page().await.unwrap().is_none());
        assert_eq!(paginator.pages(), 2);
    }

    #[tokio::test]
    async fn test_cancel_between_pages() {
        let invoker = Invoker::new(MockApiClient::new(vec![page(&["a1"], "a"), page(&[], "")]));
        let (handle, signal) = cancel_pair();
        let options = InvokeOptions {
            auto_iterate: true,
            cancel: signal,
        };

        let mut pages = Vec::new();
        let err = invoker
            .run(&LIST_KEYSPACES, &no_params(&LIST_KEYSPACES), options, |p| {
                pages.push(p);
                handle.cancel();
            })
            .await
            .unwrap_err();

        assert!(matches!(err, InvokeError::Cancelled { pages: 1, .. }));
        assert_eq!(pages.len(), 1);
        assert_eq!(invoker.client().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_after_final_page_completes() {
        let invoker = Invoker::new(MockApiClient::new(vec![Ok(json!({}))]));
        let bound = bind(&DELETE_KEYSPACE, vec![("KeyspaceName", json!("ks1"))]).unwrap();
        let (handle, signal) = cancel_pair();
        let options = InvokeOptions {
            auto_iterate: true,
            cancel: signal,
        };

        let mut pages = Vec::new();
        let summary = invoker
            .run(&DELETE_KEYSPACE, &bound, options, |p| {
                pages.push(p);
                handle.cancel();
            })
            .await
            .unwrap();

        assert_eq!(summary.pages, 1);
        assert_eq!(pages.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_after_last_listed_page_completes() {
        let invoker = Invoker::new(MockApiClient::new(vec![page(&["a1"], "a"), page(&["b1"], "")]));
        let (handle, signal) = cancel_pair();
        let options = InvokeOptions {
            auto_iterate: true,
            cancel: signal,
        };

        let mut pages = Vec::new();
        let summary = invoker
            .run(&LIST_KEYSPACES, &no_params(&LIST_KEYSPACES), options, |p| {
                pages.push(p);
                if pages.len() == 2 {
                    handle.cancel();
                }
            })
            .await
            .unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(invoker.client().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_abandons_in_flight_call() {
        // The second call never completes
        let invoker = Invoker::new(MockApiClient::new(vec![page(&["a1"], "a")]));
        let (handle, signal) = cancel_pair();
        let options = InvokeOptions {
            auto_iterate: true,
            cancel: signal,
        };

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        });

        let (result, pages) = tokio::time::timeout(
            Duration::from_secs(5),
            run_collect(&invoker, &no_params(&LIST_KEYSPACES), options),
        )
        .await
        .unwrap();

        let err = result.unwrap_err();
        assert!(err.is_cancelled());
        assert!(err.to_string().contains("1 page"));
        assert_eq!(pages.len(), 1);
        assert_eq!(invoker.client().requests().len(), 2);
    }
}
