//! Linear workflows
//!
//! A [`Workflow`] is a fixed chain of [`Step`]s. `then` only accepts a step
//! whose input type is the previous step's output, so a schema mismatch
//! between neighbours does not compile. At run time the entry input and every
//! step output are validated before crossing a boundary.
//!
//! ```text
//!  input ──validate──▶ step 1 ──validate──▶ step 2 ──validate──▶ … ──▶ output
//!                         │                    │
//!                         └──── first error aborts the run ────┘
//! ```
//!
//! No retries, no branching, no parallel steps.

pub mod market_analysis;
pub mod trade_advisor;

use async_trait::async_trait;
use std::time::Instant;
use uuid::Uuid;

use crate::error::{Result, ScoutError};

/// Boundary check for records passed between steps
pub trait Validate {
    fn validate(&self) -> std::result::Result<(), String>;
}

/// Reject blank strings with a field-named reason
pub(crate) fn non_blank(field: &str, value: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} must not be blank"))
    } else {
        Ok(())
    }
}

/// One unit of work with typed input and output
#[async_trait]
pub trait Step: Send + Sync {
    type Input: Validate + Send + 'static;
    type Output: Validate + Send + 'static;

    fn id(&self) -> &'static str;

    async fn run(&self, input: Self::Input) -> Result<Self::Output>;
}

/// A runnable sequence of checked steps
#[async_trait]
pub trait Chain: Send + Sync {
    type Input: Validate + Send + 'static;
    type Output: Validate + Send + 'static;

    async fn run(&self, input: Self::Input) -> Result<Self::Output>;

    fn step_ids(&self, ids: &mut Vec<&'static str>);
}

/// A step whose output is validated before it leaves
pub struct Checked<S>(S);

#[async_trait]
impl<S: Step> Chain for Checked<S> {
    type Input = S::Input;
    type Output = S::Output;

    async fn run(&self, input: S::Input) -> Result<S::Output> {
        let step = self.0.id();
        let started = Instant::now();
        tracing::debug!(step, "Step started");

        let output = self.0.run(input).await.inspect_err(|err| {
            tracing::warn!(step, error = %err, "Step failed");
        })?;
        output
            .validate()
            .map_err(|reason| ScoutError::schema(step, reason))?;

        tracing::debug!(step, elapsed_ms = started.elapsed().as_millis(), "Step finished");
        Ok(output)
    }

    fn step_ids(&self, ids: &mut Vec<&'static str>) {
        ids.push(self.0.id());
    }
}

/// Two chains run back to back
pub struct Then<A, B> {
    first: A,
    next: B,
}

#[async_trait]
impl<A, B> Chain for Then<A, B>
where
    A: Chain,
    B: Chain<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    async fn run(&self, input: A::Input) -> Result<B::Output> {
        let intermediate = self.first.run(input).await?;
        self.next.run(intermediate).await
    }

    fn step_ids(&self, ids: &mut Vec<&'static str>) {
        self.first.step_ids(ids);
        self.next.step_ids(ids);
    }
}

/// Named, immutable chain of steps
pub struct Workflow<C> {
    id: &'static str,
    chain: C,
}

impl<S: Step> Workflow<Checked<S>> {
    pub fn new(id: &'static str, first: S) -> Self {
        Self {
            id,
            chain: Checked(first),
        }
    }
}

impl<C: Chain> Workflow<C> {
    /// Append a step consuming this workflow's output
    pub fn then<N>(self, next: N) -> Workflow<Then<C, Checked<N>>>
    where
        N: Step<Input = C::Output>,
    {
        Workflow {
            id: self.id,
            chain: Then {
                first: self.chain,
                next: Checked(next),
            },
        }
    }

    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Step ids in execution order
    pub fn steps(&self) -> Vec<&'static str> {
        let mut ids = Vec::new();
        self.chain.step_ids(&mut ids);
        ids
    }

    /// Validate the input, then run every step in order
    pub async fn run(&self, input: C::Input) -> Result<C::Output> {
        let run_id = Uuid::new_v4();
        let started = Instant::now();
        tracing::info!(workflow = self.id, %run_id, "Workflow started");

        input
            .validate()
            .map_err(|reason| ScoutError::schema("input", reason))?;

        match self.chain.run(input).await {
            Ok(output) => {
                tracing::info!(
                    workflow = self.id,
                    %run_id,
                    elapsed_ms = started.elapsed().as_millis(),
                    "Workflow finished"
                );
                Ok(output)
            }
            Err(err) => {
                tracing::warn!(workflow = self.id, %run_id, error = %err, "Workflow aborted");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Text(String);

    impl Validate for Text {
        fn validate(&self) -> std::result::Result<(), String> {
            non_blank("text", &self.0)
        }
    }

    #[derive(Debug)]
    struct Len(usize);

    impl Validate for Len {
        fn validate(&self) -> std::result::Result<(), String> {
            Ok(())
        }
    }

    struct Upper;

    #[async_trait]
    impl Step for Upper {
        type Input = Text;
        type Output = Text;

        fn id(&self) -> &'static str {
            "upper"
        }

        async fn run(&self, input: Text) -> Result<Text> {
            Ok(Text(input.0.to_uppercase()))
        }
    }

    /// Emits a blank string, which fails validation
    struct Blank;

    #[async_trait]
    impl Step for Blank {
        type Input = Text;
        type Output = Text;

        fn id(&self) -> &'static str {
            "blank"
        }

        async fn run(&self, _input: Text) -> Result<Text> {
            Ok(Text("   ".into()))
        }
    }

    struct Count(Arc<AtomicUsize>);

    #[async_trait]
    impl Step for Count {
        type Input = Text;
        type Output = Len;

        fn id(&self) -> &'static str {
            "count"
        }

        async fn run(&self, input: Text) -> Result<Len> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Len(input.0.len()))
        }
    }

    struct Fail;

    #[async_trait]
    impl Step for Fail {
        type Input = Text;
        type Output = Text;

        fn id(&self) -> &'static str {
            "fail"
        }

        async fn run(&self, _input: Text) -> Result<Text> {
            Err(ScoutError::Upstream("boom".into()))
        }
    }

    #[tokio::test]
    async fn runs_steps_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let workflow = Workflow::new("demo", Upper).then(Count(Arc::clone(&calls)));

        assert_eq!(workflow.steps(), vec!["upper", "count"]);
        let out = workflow.run(Text("btc".into())).await.unwrap();
        assert_eq!(out.0, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_output_aborts_before_next_step() {
        let calls = Arc::new(AtomicUsize::new(0));
        let workflow = Workflow::new("demo", Blank).then(Count(Arc::clone(&calls)));

        let err = workflow.run(Text("btc".into())).await.unwrap_err();
        assert!(matches!(err, ScoutError::Schema { ref step, .. } if step == "blank"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_input_is_rejected() {
        let workflow = Workflow::new("demo", Upper);
        let err = workflow.run(Text(String::new())).await.unwrap_err();
        assert!(matches!(err, ScoutError::Schema { ref step, .. } if step == "input"));
    }

    #[tokio::test]
    async fn first_error_is_returned_unchanged() {
        let calls = Arc::new(AtomicUsize::new(0));
        let workflow = Workflow::new("demo", Upper)
            .then(Fail)
            .then(Count(Arc::clone(&calls)));

        let err = workflow.run(Text("eth".into())).await.unwrap_err();
        assert!(matches!(err, ScoutError::Upstream(ref msg) if msg == "boom"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
