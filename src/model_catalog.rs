use crate::image_classifier::interface::OutputKind;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    pub description: String,
    pub model_name: String,
    pub labels: Vec<String>,
    pub explainers: Vec<String>,
    pub output: OutputKind,
}

impl ModelSpec {
    /// Explainer asset of the highest scoring class. Index 0 when nothing has been predicted yet.
    pub fn explainer_for(&self, scores: &[f32]) -> Option<&str> {
        let index = if scores.is_empty() { 0 } else { argmax(scores) };
        self.explainers.get(index).map(|e| e.as_str())
    }

    pub fn explainer_path(&self, explainer: &str) -> String {
        format!("models/{}/{}", self.model_name, explainer)
    }
}

pub fn catalog() -> Vec<ModelSpec> {
    vec![
        ModelSpec {
            description: "Open hand recognition".to_string(),
            model_name: "hands2-93-0.9880".to_string(),
            labels: strings(&["close", "open"]),
            explainers: strings(&["classes/closed.jpg", "classes/opened.jpg"]),
            output: OutputKind::Binary { class_index: 1 },
        },
        ModelSpec {
            description: "Open hand & fingers recognition (very raw)".to_string(),
            model_name: "handsMulti-47-0.8496".to_string(),
            labels: strings(&[
                "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "q", "w", "x", "z",
            ]),
            // "z" has no explainer image
            explainers: strings(&[
                "classes/0.jpg",
                "classes/1.jpg",
                "classes/2.jpg",
                "classes/3.jpg",
                "classes/4.jpg",
                "classes/5.jpg",
                "classes/6.jpg",
                "classes/7.jpg",
                "classes/8.jpg",
                "classes/9.jpg",
                "classes/q.jpg",
                "classes/w.jpg",
                "classes/x.jpg",
            ]),
            output: OutputKind::Scores { softmax: false },
        },
    ]
}

/// First index of the maximum value; 0 for an empty slice.
pub fn argmax(values: &[f32]) -> usize {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub fn to_percent(score: f32) -> String {
    format!("{:.2}", score * 100.0)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
