// tests/session_flow_tests.rs

use std::{
    collections::{HashSet, VecDeque},
    sync::Mutex,
};

use async_trait::async_trait;
use quizdeck::{
    Presenter, QuizApi, QuizRunner, QuizSession,
    error::{ErrorKind, GatewayError, SubmitErrorKind},
    models::{
        question::{Label, Question, QuestionId},
        review::Review,
        submission::{ResultItem, SubmissionRequest, SubmissionResponse},
    },
    quiz::navigation::{Direction, NavAffordances},
    state::Phase,
};

/// In-memory quiz API with scripted submission outcomes.
struct FakeApi {
    questions: Vec<Question>,
    submit_outcomes: Mutex<VecDeque<Result<(), GatewayError>>>,
    requests: Mutex<Vec<SubmissionRequest>>,
}

impl FakeApi {
    fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            submit_outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn fail_next_submit(self, error: GatewayError) -> Self {
        self.submit_outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    fn requests(&self) -> Vec<SubmissionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuizApi for FakeApi {
    async fn fetch_questions(&self) -> Result<Vec<Question>, GatewayError> {
        Ok(self.questions.clone())
    }

    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResponse, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(Err(e)) = self.submit_outcomes.lock().unwrap().pop_front() {
            return Err(e);
        }
        let results = self
            .questions
            .iter()
            .map(|q| ResultItem {
                question_id: q.question_id.clone(),
                prompt: q.prompt.clone(),
                options: q.options.clone(),
                correct_label: Label::from_index(0).unwrap(),
                user_label: request
                    .answers
                    .iter()
                    .find(|a| a.question_id == q.question_id)
                    .map(|a| a.label),
                explanation: String::new(),
            })
            .collect();
        Ok(SubmissionResponse { score: 1.0, results })
    }
}

#[derive(Default)]
struct CountingPresenter {
    questions: usize,
    reviews: usize,
    errors: Vec<ErrorKind>,
}

impl Presenter for CountingPresenter {
    fn render_question(&mut self, _: &Question, _: Option<Label>, _: usize, _: usize, _: NavAffordances) {
        self.questions += 1;
    }

    fn render_review(&mut self, _: &Review) {
        self.reviews += 1;
    }

    fn render_error(&mut self, kind: ErrorKind, _: &str) {
        self.errors.push(kind);
    }
}

fn scenario_questions() -> Vec<Question> {
    let make = |id: i64, options: &[&str]| Question {
        question_id: QuestionId::Number(id),
        prompt: format!("Question {}", id),
        options: options.iter().map(|s| s.to_string()).collect(),
    };
    vec![
        make(1, &["A0", "A1", "A2"]),
        make(2, &["B0", "B1"]),
        make(3, &["C0", "C1", "C2", "C3"]),
    ]
}

fn label(s: &str) -> Label {
    Label::parse(s).unwrap()
}

#[tokio::test]
async fn three_question_scenario_payload() {
    let mut runner = QuizRunner::new(FakeApi::new(scenario_questions()), CountingPresenter::default());
    runner.load().await.unwrap();

    runner.select_current(2).unwrap();
    runner.navigate(Direction::Next).await;
    runner.select_current(1).unwrap();
    runner.navigate(Direction::Next).await;
    runner.select_current(0).unwrap();
    runner.navigate(Direction::Submit).await.unwrap().unwrap();

    let session = runner.session();
    assert_eq!(session.phase(), Phase::Reviewing);
    assert_eq!(session.presenter().reviews, 1);

    let review = session.review().unwrap();
    let chosen: Vec<_> = review.items.iter().map(|i| i.user_label).collect();
    assert_eq!(chosen, vec![Some(label("C")), Some(label("B")), Some(label("A"))]);
}

#[tokio::test]
async fn payload_matches_answer_store_exactly() {
    let mut runner = QuizRunner::new(FakeApi::new(scenario_questions()), CountingPresenter::default());
    runner.load().await.unwrap();

    runner.select(&QuestionId::Number(1), 2).unwrap();
    runner.select(&QuestionId::Number(1), 0).unwrap();
    runner.navigate(Direction::Next).await;
    runner.select(&QuestionId::Number(2), 1).unwrap();
    runner.navigate(Direction::Next).await;
    runner.select(&QuestionId::Number(3), 3).unwrap();
    // revisit and change the first answer
    runner.navigate(Direction::Back).await;
    runner.navigate(Direction::Back).await;
    runner.select(&QuestionId::Number(1), 1).unwrap();
    runner.navigate(Direction::Next).await;
    runner.navigate(Direction::Next).await;

    let expected = runner.session().answers().to_submission_payload();
    runner.navigate(Direction::Submit).await.unwrap().unwrap();

    let requests = runner.api().requests();
    assert_eq!(requests, vec![expected]);

    let request = &requests[0];
    let ids: HashSet<_> = request.answers.iter().map(|a| a.question_id.clone()).collect();
    assert_eq!(ids.len(), request.answers.len());
    assert_eq!(
        ids,
        scenario_questions().into_iter().map(|q| q.question_id).collect::<HashSet<_>>()
    );
    let first = request
        .answers
        .iter()
        .find(|a| a.question_id == QuestionId::Number(1))
        .unwrap();
    assert_eq!(first.label, label("B"));
}

#[test]
fn unanswered_questions_are_left_out() {
    let questions = scenario_questions();
    let mut session = QuizSession::new(CountingPresenter::default());
    let ticket = session.begin_load();
    session.complete_load(ticket.token, Ok(questions)).unwrap();

    session.select(&QuestionId::Number(3), 1).unwrap();
    let payload = session.answers().to_submission_payload();

    assert_eq!(payload.answers.len(), 1);
    assert_eq!(payload.answers[0].question_id, QuestionId::Number(3));
    assert!(session.navigate(Direction::Submit).is_none());
}

#[tokio::test]
async fn network_failure_then_identical_retry() {
    let api = FakeApi::new(scenario_questions()).fail_next_submit(GatewayError::Network("connection reset".into()));
    let mut runner = QuizRunner::new(api, CountingPresenter::default());
    runner.load().await.unwrap();
    for index in [2, 1, 0] {
        runner.select_current(index).unwrap();
        runner.navigate(Direction::Next).await;
    }

    let first = runner.navigate(Direction::Submit).await.unwrap();
    assert!(first.is_err());
    assert_eq!(runner.session().phase(), Phase::Answering);
    assert_eq!(runner.session().position(), 2);
    assert_eq!(runner.session().answers().answered_count(), 3);
    assert_eq!(
        runner.session().presenter().errors,
        vec![ErrorKind::SubmitFailed(SubmitErrorKind::NetworkError)]
    );

    runner.navigate(Direction::Submit).await.unwrap().unwrap();
    assert_eq!(runner.session().phase(), Phase::Reviewing);

    let requests = runner.api().requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
}

#[tokio::test]
async fn fake_api_sees_two_identical_requests() {
    let api = FakeApi::new(scenario_questions()).fail_next_submit(GatewayError::Network("timeout".into()));
    let mut session = QuizSession::new(CountingPresenter::default());

    let ticket = session.begin_load();
    session
        .complete_load(ticket.token, api.fetch_questions().await)
        .unwrap();
    for index in [1, 0, 2] {
        let id = session.current_question().unwrap().question_id.clone();
        session.select(&id, index).unwrap();
        session.navigate(Direction::Next);
    }

    let first = session.navigate(Direction::Submit).unwrap();
    let outcome = api.submit(&first.request).await;
    assert!(session.complete_submit(first.token, outcome).is_err());

    let second = session.navigate(Direction::Submit).unwrap();
    let outcome = api.submit(&second.request).await;
    session.complete_submit(second.token, outcome).unwrap();

    let requests = api.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1]);
}

#[test]
fn last_selection_wins_for_every_sequence() {
    let questions = scenario_questions();
    let option_count = questions[2].options.len();
    let id = questions[2].question_id.clone();

    // every sequence of length 1..=3 over the four options of Q3
    for len in 1..=3u32 {
        for seq in 0..option_count.pow(len) {
            let mut session = QuizSession::new(CountingPresenter::default());
            let ticket = session.begin_load();
            session.complete_load(ticket.token, Ok(questions.clone())).unwrap();

            let mut rest = seq;
            let mut last = 0;
            for _ in 0..len {
                last = rest % option_count;
                rest /= option_count;
                session.select(&id, last).unwrap();
            }
            assert_eq!(session.answers().get(&id), Label::from_index(last));
        }
    }
}
