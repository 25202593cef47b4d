use serde_json::Value;

/// One strategy for locating the generated text in an upstream reply of
/// unknown shape.
pub struct Probe {
    /// Where the probe looks, for logging.
    pub name: &'static str,
    extract: fn(&Value) -> Option<&str>,
}

fn direct_response(body: &Value) -> Option<&str> {
    body.get("response").and_then(Value::as_str)
}

fn direct_text(body: &Value) -> Option<&str> {
    body.get("text").and_then(Value::as_str)
}

fn direct_generated_text(body: &Value) -> Option<&str> {
    body.get("generated_text").and_then(Value::as_str)
}

fn first_choice_message_content(body: &Value) -> Option<&str> {
    body.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
}

fn first_choice_text(body: &Value) -> Option<&str> {
    body.get("choices")?.get(0)?.get("text")?.as_str()
}

/// The known locations of generated text across model API flavors, in fixed
/// priority order: direct fields first (Ollama-style `response`,
/// text-generation `text` / `generated_text`), then the OpenAI-style
/// `choices` list. If an upstream populates more than one, the earliest
/// non-empty candidate wins.
pub const PROBES: &[Probe] = &[
    Probe {
        name: "response",
        extract: direct_response,
    },
    Probe {
        name: "text",
        extract: direct_text,
    },
    Probe {
        name: "generated_text",
        extract: direct_generated_text,
    },
    Probe {
        name: "choices[0].message.content",
        extract: first_choice_message_content,
    },
    Probe {
        name: "choices[0].text",
        extract: first_choice_text,
    },
];

/// Apply the probe table to an upstream reply and return the winning probe's
/// name together with the generated text, or `None` when no probe finds a
/// non-empty candidate.
pub fn extract_generated_text(body: &Value) -> Option<(&'static str, &str)> {
    PROBES.iter().find_map(|probe| {
        (probe.extract)(body)
            .filter(|text| !text.is_empty())
            .map(|text| (probe.name, text))
    })
}

/// Remove surrounding markdown code-fence markers and trim.
///
/// Models frequently wrap their JSON in ` ```json … ``` ` despite being told
/// not to; the fences are presentation, not content.
pub fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();

    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }

    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }

    cleaned.trim()
}
