use clap::Args;
use serde_json::Value;

use finproj_core::scenarios::{self, ScenarioSet};

use crate::input;

/// Arguments for batch scenario evaluation
#[derive(Args)]
pub struct ScenariosArgs {
    /// Path to JSON/YAML file with a `scenarios` list
    #[arg(long)]
    pub input: Option<String>,

    /// Drop per-scenario schedules and keep only summaries
    #[arg(long)]
    pub summary_only: bool,
}

pub fn run_scenarios(args: ScenariosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let set: ScenarioSet = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json|file.yaml> or stdin required for scenarios".into());
    };

    let result = scenarios::evaluate_scenarios(&set)?;
    let mut value = serde_json::to_value(result)?;
    if args.summary_only {
        strip_schedules(&mut value);
    }
    Ok(value)
}

fn strip_schedules(value: &mut Value) {
    let Some(outcomes) = value
        .pointer_mut("/result/outcomes")
        .and_then(Value::as_array_mut)
    else {
        return;
    };
    for outcome in outcomes {
        if let Some(result) = outcome.get_mut("result").and_then(Value::as_object_mut) {
            result.remove("monthly_schedule");
            result.remove("yearly_schedule");
        }
    }
}
