use cucumber::World;
use quote_engine::{
    order_types::Order,
    quote_types::Quote,
    test_utils::{EventRecorder, MockBackend, QuoteBuilder},
    QuoteManagementApi,
    QuoteSubmissionError,
    SubmissionOutcome,
};

#[derive(Default, Debug, World)]
pub struct QuoteWorld {
    pub builder: Option<QuoteBuilder>,
    pub backend: MockBackend,
    pub events: EventRecorder,
    pub quote: Option<Quote>,
    pub result: Option<Result<SubmissionOutcome, QuoteSubmissionError>>,
}

impl QuoteWorld {
    pub fn edit_quote<F: FnOnce(QuoteBuilder) -> QuoteBuilder>(&mut self, f: F) {
        let builder = self.builder.take().expect("No quote has been set up");
        self.builder = Some(f(builder));
    }

    pub fn api(&self) -> QuoteManagementApi<MockBackend, EventRecorder> {
        QuoteManagementApi::new(self.backend.clone(), self.events.clone())
    }

    pub fn take_quote(&mut self) -> Quote {
        self.builder.take().expect("No quote has been set up").build()
    }

    pub fn quote(&self) -> &Quote {
        self.quote.as_ref().expect("The quote has not been submitted")
    }

    pub fn order(&self) -> &Order {
        match &self.result {
            Some(Ok(SubmissionOutcome::Placed(order))) => order,
            other => panic!("Expected a placed order, got {other:?}"),
        }
    }

    pub fn error(&self) -> &QuoteSubmissionError {
        match &self.result {
            Some(Err(e)) => e,
            other => panic!("Expected a failed submission, got {other:?}"),
        }
    }
}
