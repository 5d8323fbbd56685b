use std::cell::RefCell;

use protocol::{QueryRequest, QueryResult};
use tracing::{debug, warn};

use crate::client::{QueryClient, QueryError, QueryTransport};

/// Handle for one submission. Only the ticket of the latest submission can
/// change controller state when it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    query: String,
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer submission superseded this one, or it was already completed.
    Stale,
}

/// What the results area shows. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayState<'a> {
    Welcome,
    Loading,
    Error(&'a str),
    Result(&'a QueryResult),
}

#[derive(Debug, Default)]
pub struct QueryController {
    query_text: String,
    loading: bool,
    error: Option<String>,
    result: Option<QueryResult>,
    generation: u64,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirrors the query input field.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    pub fn query(&self) -> &str {
        &self.query_text
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&QueryResult> {
        self.result.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a submission of `query`.
    ///
    /// Blank queries are ignored: no ticket, no state change. Otherwise the
    /// previous error and result are cleared, loading is set and any ticket
    /// still in flight becomes stale.
    pub fn submit(&mut self, query: &str) -> Option<RequestTicket> {
        if !QueryRequest::new(query).is_submittable() {
            return None;
        }

        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.result = None;

        debug!(generation = self.generation, "query submitted");
        Some(RequestTicket {
            generation: self.generation,
            query: query.to_string(),
        })
    }

    /// Applies the outcome of `ticket` if it is still the latest submission.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<QueryResult, QueryError>,
    ) -> Completion {
        if ticket.generation != self.generation || !self.loading {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale query response"
            );
            return Completion::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(result) => {
                for issue in result.contract_issues() {
                    warn!(%issue, "query result breaks chart contract");
                }
                debug!(
                    generation = ticket.generation,
                    charts = result.visualizations.len(),
                    "query succeeded"
                );
                self.result = Some(result);
            }
            Err(err) => {
                debug!(generation = ticket.generation, error = %err, "query failed");
                self.error = Some(err.to_string());
            }
        }
        Completion::Applied
    }

    pub fn display(&self) -> DisplayState<'_> {
        if self.loading {
            DisplayState::Loading
        } else if let Some(err) = &self.error {
            DisplayState::Error(err)
        } else if let Some(result) = &self.result {
            DisplayState::Result(result)
        } else {
            DisplayState::Welcome
        }
    }
}

/// Runs one submission end to end against a shared controller.
///
/// The controller is only borrowed around `submit` and `complete`, never
/// across the network await, so UI code can read it while the request is in
/// flight. Returns `None` when the query was blank and nothing was sent.
pub async fn submit_with<T: QueryTransport>(
    controller: &RefCell<QueryController>,
    client: &QueryClient<T>,
    query: &str,
) -> Option<Completion> {
    let ticket = controller.borrow_mut().submit(query)?;
    let outcome = client.query(ticket.query()).await;
    Some(controller.borrow_mut().complete(ticket, outcome))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::client::testing::{SAMPLE_RESULT, ScriptedTransport};
    use crate::client::{GENERIC_FAILURE, QueryClient};
    use crate::config::BackendConfig;
    use pretty_assertions::assert_eq;

    fn sample() -> QueryResult {
        serde_json::from_str(SAMPLE_RESULT).unwrap()
    }

    fn client(transport: ScriptedTransport) -> QueryClient<ScriptedTransport> {
        QueryClient::new(BackendConfig::default(), transport)
    }

    #[test]
    fn starts_on_welcome() {
        let ctrl = QueryController::new();
        assert_eq!(ctrl.display(), DisplayState::Welcome);
        assert!(!ctrl.is_loading());
    }

    #[test]
    fn blank_queries_are_ignored() {
        let mut ctrl = QueryController::new();
        let ticket = ctrl.submit("real question").unwrap();
        ctrl.complete(ticket, Ok(sample()));

        for blank in ["", "   ", "\n\t"] {
            assert!(ctrl.submit(blank).is_none());
        }
        assert_eq!(ctrl.generation(), 1);
        assert!(!ctrl.is_loading());
        assert_eq!(ctrl.result(), Some(&sample()));
    }

    #[test]
    fn blank_query_never_reaches_the_network() {
        let ctrl = RefCell::new(QueryController::new());
        let client = client(ScriptedTransport::new().respond(200, SAMPLE_RESULT));
        let completion = pollster::block_on(submit_with(&ctrl, &client, "    "));
        assert_eq!(completion, None);
        assert!(client.transport().calls().is_empty());
        assert_eq!(ctrl.borrow().display(), DisplayState::Welcome);
    }

    #[test]
    fn submit_clears_previous_outcome_and_sets_loading() {
        let mut ctrl = QueryController::new();
        let ticket = ctrl.submit("first").unwrap();
        ctrl.complete(ticket, Err(QueryError::Transport("offline".to_string())));
        assert_eq!(ctrl.display(), DisplayState::Error("offline"));

        let _ticket = ctrl.submit("second").unwrap();
        assert!(ctrl.is_loading());
        assert_eq!(ctrl.error(), None);
        assert_eq!(ctrl.result(), None);
        assert_eq!(ctrl.display(), DisplayState::Loading);
    }

    #[test]
    fn success_stores_payload_verbatim() {
        let ctrl = RefCell::new(QueryController::new());
        let client = client(ScriptedTransport::new().respond(200, SAMPLE_RESULT));
        let completion = pollster::block_on(submit_with(&ctrl, &client, "SpaceX launches in 2024"));
        assert_eq!(completion, Some(Completion::Applied));

        let ctrl = ctrl.borrow();
        assert!(!ctrl.is_loading());
        assert_eq!(ctrl.result(), Some(&sample()));
        assert_eq!(ctrl.display(), DisplayState::Result(&sample()));
    }

    #[test]
    fn backend_detail_is_shown() {
        let ctrl = RefCell::new(QueryController::new());
        let client = client(ScriptedTransport::new().respond(400, r#"{"detail":"X"}"#));
        pollster::block_on(submit_with(&ctrl, &client, "hm"));
        assert_eq!(ctrl.borrow().error(), Some("X"));
        assert!(!ctrl.borrow().is_loading());
    }

    #[test]
    fn unparsable_failure_shows_generic_message() {
        let ctrl = RefCell::new(QueryController::new());
        let client = client(ScriptedTransport::new().respond(502, "<html>bad gateway</html>"));
        pollster::block_on(submit_with(&ctrl, &client, "Compare ISRO and NASA"));
        assert_eq!(ctrl.borrow().error(), Some(GENERIC_FAILURE));
    }

    #[test]
    fn transport_failure_is_shown() {
        let ctrl = RefCell::new(QueryController::new());
        let client = client(ScriptedTransport::new().fail("NetworkError when attempting to fetch resource."));
        pollster::block_on(submit_with(&ctrl, &client, "Artemis timeline"));
        assert_eq!(
            ctrl.borrow().display(),
            DisplayState::Error("NetworkError when attempting to fetch resource.")
        );
    }

    #[test]
    fn sends_the_untrimmed_query() {
        let ctrl = RefCell::new(QueryController::new());
        let client = client(ScriptedTransport::new().respond(200, SAMPLE_RESULT));
        pollster::block_on(submit_with(&ctrl, &client, "  Mars rovers "));
        assert_eq!(
            client.transport().calls()[0].body.as_deref(),
            Some(r#"{"query":"  Mars rovers "}"#)
        );
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut ctrl = QueryController::new();
        let first = ctrl.submit("slow query").unwrap();
        let second = ctrl.submit("fast query").unwrap();
        assert!(second.generation() > first.generation());

        // The older request resolves last in real life; order does not matter here.
        assert_eq!(ctrl.complete(first, Ok(sample())), Completion::Stale);
        assert!(ctrl.is_loading());
        assert_eq!(ctrl.result(), None);

        assert_eq!(
            ctrl.complete(second, Err(QueryError::Transport("offline".to_string()))),
            Completion::Applied
        );
        assert!(!ctrl.is_loading());
        assert_eq!(ctrl.error(), Some("offline"));
        assert_eq!(ctrl.result(), None);
    }

    #[test]
    fn stale_response_after_newer_completion_is_ignored() {
        let mut ctrl = QueryController::new();
        let first = ctrl.submit("a").unwrap();
        let second = ctrl.submit("b").unwrap();
        assert_eq!(ctrl.complete(second, Ok(sample())), Completion::Applied);
        assert_eq!(
            ctrl.complete(first, Err(QueryError::Transport("late".to_string()))),
            Completion::Stale
        );
        assert_eq!(ctrl.error(), None);
        assert_eq!(ctrl.result(), Some(&sample()));
    }

    #[test]
    fn a_ticket_applies_once() {
        let mut ctrl = QueryController::new();
        let ticket = ctrl.submit("a").unwrap();
        assert_eq!(ctrl.complete(ticket.clone(), Ok(sample())), Completion::Applied);
        assert_eq!(
            ctrl.complete(ticket, Err(QueryError::Transport("dup".to_string()))),
            Completion::Stale
        );
        assert_eq!(ctrl.result(), Some(&sample()));
    }

    #[test]
    fn query_text_mirrors_the_input() {
        let mut ctrl = QueryController::new();
        ctrl.set_query("Show me SpaceX launches in 2024");
        assert_eq!(ctrl.query(), "Show me SpaceX launches in 2024");
    }
}
