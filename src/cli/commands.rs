//! CLI command implementations
//!
//! `start` boots the in-memory stores, applies the seed fixture and then
//! serves one JSON request per stdin line until EOF.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::{QaError, QaResult};
use crate::model::Vote;
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::questions::{QuestionFilter, SortSpec};
use crate::reputation::InMemoryReputationStore;
use crate::service::QaService;
use crate::store::InMemoryRelationalStore;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_requests, write_error, write_response};
use super::seed::Seed;

/// One decoded request line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    PostQuestion {
        author_id: Uuid,
        category: String,
        title: String,
        content: String,
    },
    SubmitAnswer {
        question_id: Uuid,
        author_id: Uuid,
        content: String,
    },
    SlotAvailable {
        question_id: Uuid,
    },
    VoteOnAnswer {
        voter_id: Uuid,
        answer_id: Uuid,
        vote: String,
    },
    VoteOnQuestion {
        voter_id: Uuid,
        question_id: Uuid,
        vote: String,
    },
    FindPost {
        question_id: Uuid,
    },
    QuestionsBy {
        filter: String,
        value: String,
    },
    SortedQuestions {
        component: String,
        column: String,
        #[serde(default = "default_order")]
        order: String,
        #[serde(default)]
        offset: usize,
    },
    Reputation {
        category: String,
        user_id: Uuid,
    },
    Assess {
        question_id: Uuid,
    },
    Metrics,
}

fn default_order() -> String {
    "desc".to_string()
}

impl Request {
    /// Operation name, for logs
    pub fn op(&self) -> &'static str {
        match self {
            Request::PostQuestion { .. } => "post_question",
            Request::SubmitAnswer { .. } => "submit_answer",
            Request::SlotAvailable { .. } => "slot_available",
            Request::VoteOnAnswer { .. } => "vote_on_answer",
            Request::VoteOnQuestion { .. } => "vote_on_question",
            Request::FindPost { .. } => "find_post",
            Request::QuestionsBy { .. } => "questions_by",
            Request::SortedQuestions { .. } => "sorted_questions",
            Request::Reputation { .. } => "reputation",
            Request::Assess { .. } => "assess",
            Request::Metrics => "metrics",
        }
    }
}

/// Counts reported when the request loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    pub handled: u64,
    pub failed: u64,
}

/// Dispatch a parsed command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Check { config } => check(&config),
        Command::Start { config } => start(&config),
    }
}

/// Validate the configuration file
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let mut stdout = io::stdout();
    write_response(
        &mut stdout,
        json!({
            "valid": true,
            "config": config,
        }),
    )
}

/// Boot the stores and serve requests from stdin
pub fn start(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("config", &config_path.display().to_string()),
            ("log_level", &config.log_level),
        ],
    );

    let service = boot(&config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    serve(&service, stdin.lock(), &mut stdout)?;
    Ok(())
}

/// Build a service over fresh in-memory stores, applying the seed fixture
/// if one is configured.
pub fn boot(config: &Config) -> CliResult<QaService> {
    let relational = Arc::new(InMemoryRelationalStore::new());
    let reputation = Arc::new(InMemoryReputationStore::new());

    if let Some(path) = &config.seed_file {
        Seed::read(path)?.apply(&relational, &reputation)?;
    }

    Ok(QaService::new(
        relational,
        reputation,
        config.rewards,
        config.question_asking_fee,
    ))
}

/// Serve requests until EOF.
///
/// Request failures are answered with an error line and the loop continues;
/// only output failures end it early.
pub fn serve<R: BufRead, W: Write>(
    service: &QaService,
    input: R,
    out: &mut W,
) -> CliResult<ServeSummary> {
    log_event_with_fields(Event::ServeStart, &[]);
    let mut summary = ServeSummary::default();

    for line in read_requests(input) {
        summary.handled += 1;

        let request = match line.and_then(decode) {
            Ok(request) => request,
            Err(e) => {
                summary.failed += 1;
                log_event_with_fields(
                    Event::RequestFailed,
                    &[("code", e.code_str()), ("reason", e.message())],
                );
                write_error(out, e.code_str(), e.message())?;
                continue;
            }
        };

        match handle(service, &request) {
            Ok(data) => write_response(out, data)?,
            Err(e) => {
                summary.failed += 1;
                log_event_with_fields(
                    Event::RequestFailed,
                    &[
                        ("code", e.code()),
                        ("op", request.op()),
                        ("reason", &e.to_string()),
                    ],
                );
                write_error(out, e.code(), &e.to_string())?;
            }
        }
    }

    log_event_with_fields(
        Event::ServeComplete,
        &[
            ("failed", &summary.failed.to_string()),
            ("handled", &summary.handled.to_string()),
        ],
    );
    Ok(summary)
}

fn decode(value: Value) -> CliResult<Request> {
    serde_json::from_value(value).map_err(|e| CliError::bad_request(e.to_string()))
}

/// Run one request against the service
pub fn handle(service: &QaService, request: &Request) -> QaResult<Value> {
    match request {
        Request::PostQuestion {
            author_id,
            category,
            title,
            content,
        } => to_data(service.post_question(*author_id, category, title, content)?),
        Request::SubmitAnswer {
            question_id,
            author_id,
            content,
        } => to_data(service.submit_answer(*question_id, *author_id, content)?),
        Request::SlotAvailable { question_id } => Ok(json!({
            "available": service.is_slot_available(*question_id)?,
        })),
        Request::VoteOnAnswer {
            voter_id,
            answer_id,
            vote,
        } => to_data(service.vote_on_answer(*voter_id, *answer_id, vote.parse::<Vote>()?)?),
        Request::VoteOnQuestion {
            voter_id,
            question_id,
            vote,
        } => to_data(service.vote_on_question(*voter_id, *question_id, vote.parse::<Vote>()?)?),
        Request::FindPost { question_id } => to_data(service.find_post(*question_id)?),
        Request::QuestionsBy { filter, value } => {
            let filter = QuestionFilter::parse(filter, value)?;
            to_data(service.questions_by(&filter)?)
        }
        Request::SortedQuestions {
            component,
            column,
            order,
            offset,
        } => {
            let spec = SortSpec::new(component, column, order, *offset)?;
            to_data(service.sorted_questions(&spec)?)
        }
        Request::Reputation { category, user_id } => Ok(json!({
            "score": service.reputation(category, *user_id)?,
        })),
        Request::Assess { question_id } => to_data(service.assess(*question_id)?),
        Request::Metrics => to_data(service.metrics()),
    }
}

fn to_data<T: Serialize>(value: T) -> QaResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| QaError::Storage(format!("failed to encode response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(service: &QaService, lines: &[Value]) -> (ServeSummary, Vec<Value>) {
        let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        let mut out = Vec::new();
        let summary = serve(service, Cursor::new(input), &mut out).unwrap();
        let responses = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (summary, responses)
    }

    #[test]
    fn test_request_loop_round() {
        let service = boot(&Config::default()).unwrap();
        let author = Uuid::new_v4();
        let (_, responses) = run(
            &service,
            &[json!({
                "op": "post_question",
                "author_id": author,
                "category": "gains",
                "title": "t",
                "content": "c"
            })],
        );
        assert_eq!(responses[0]["status"], "ok");
        let question_id: Uuid =
            serde_json::from_value(responses[0]["data"]["id"].clone()).unwrap();

        let (summary, responses) = run(
            &service,
            &[
                json!({"op": "submit_answer", "question_id": question_id,
                       "author_id": Uuid::new_v4(), "content": "a"}),
                json!({"op": "reputation", "category": "gains", "user_id": author}),
                json!({"op": "metrics"}),
            ],
        );
        assert_eq!(summary, ServeSummary { handled: 3, failed: 0 });
        assert_eq!(responses[0]["data"]["required_upvotes"], 20);
        assert_eq!(responses[1]["data"]["score"], 3);
        assert_eq!(responses[2]["data"]["answers_submitted"], 1);
    }

    #[test]
    fn test_errors_do_not_stop_loop() {
        let service = boot(&Config::default()).unwrap();
        let (summary, responses) = run(
            &service,
            &[
                json!({"op": "find_post", "question_id": Uuid::new_v4()}),
                json!({"op": "no_such_op"}),
                json!({"op": "sorted_questions", "component": "answer", "column": "edits"}),
                json!({"op": "metrics"}),
            ],
        );
        assert_eq!(summary, ServeSummary { handled: 4, failed: 3 });
        assert_eq!(responses[0]["code"], "QA_NOT_FOUND");
        assert_eq!(responses[1]["code"], "ANSWERDB_CLI_BAD_REQUEST");
        assert_eq!(responses[2]["code"], "QA_VALIDATION");
        assert_eq!(responses[3]["status"], "ok");
    }

    #[test]
    fn test_sorted_questions_request() {
        let service = boot(&Config::default()).unwrap();
        for title in ["first", "second"] {
            service
                .post_question(Uuid::new_v4(), "gains", title, "body")
                .unwrap();
        }

        let data = handle(
            &service,
            &Request::SortedQuestions {
                component: "question".into(),
                column: "date".into(),
                order: "asc".into(),
                offset: 1,
            },
        )
        .unwrap();

        let titles: Vec<&str> = data
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles.len(), 1);
    }

    #[test]
    fn test_vote_string_accepts_aliases() {
        let service = boot(&Config::default()).unwrap();
        let err = handle(
            &service,
            &Request::VoteOnAnswer {
                voter_id: Uuid::new_v4(),
                answer_id: Uuid::new_v4(),
                vote: "sideways".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, QaError::Validation(_)));
    }
}
