//! Pipeline documento → set: subida del archivo, extracción remota de texto,
//! resumen/generación remota y materialización del set resultante.
//!
//! Cada llamada de red puede fallar por separado; cualquier fallo aborta el
//! pipeline y el store no se toca. La parte asíncrona (hilo nativo o
//! `spawn_local` en wasm) vive en `app::actions`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Flashcard, McqOption, NewFlashcardSet, SummaryMode};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Extensión fuera de la lista permitida. Se detecta en local, antes de
    /// cualquier llamada de red.
    UnsupportedFileType(String),
    UploadFailed(String),
    ProcessingFailed(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::UnsupportedFileType(name) => write!(
                f,
                "Tipo de archivo no soportado: {name}. Sube un PDF, Word o PowerPoint."
            ),
            PipelineError::UploadFailed(msg) => write!(f, "Fallo al subir el archivo: {msg}"),
            PipelineError::ProcessingFailed(msg) => write!(f, "Fallo al procesar el texto: {msg}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    text: String,
}

#[derive(Debug, Serialize)]
struct ProcessRequest<'a> {
    text: &'a str,
    mode: &'a str,
}

/// Respuesta del endpoint de procesado. El generador devuelve las tarjetas
/// bajo claves con mayúscula ("Cards", "Question"), de ahí los alias.
#[derive(Debug, Deserialize)]
pub struct ProcessResponse {
    pub summary: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub flashcards: Option<FlashcardsPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FlashcardsPayload {
    #[serde(default, alias = "Cards")]
    pub cards: Vec<QaPair>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct QaPair {
    #[serde(alias = "Question")]
    pub question: String,
    #[serde(alias = "Answer")]
    pub answer: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    detail: String,
}

/// Resultado completo de un run del pipeline, listo para previsualizar y,
/// si el usuario quiere, materializar como set.
#[derive(Debug, Clone)]
pub struct GeneratedDraft {
    pub file_name: String,
    pub mode: SummaryMode,
    pub summary: String,
    pub explanation: Option<String>,
    pub cards: Vec<QaPair>,
}

/// Path de extracción según la extensión del archivo. Las extensiones fuera
/// de la lista fallan aquí mismo, sin tocar la red.
pub fn endpoint_path_for(file_name: &str) -> Result<&'static str, PipelineError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => Ok("/parse-pdf"),
        "doc" | "docx" => Ok("/parse-docx"),
        "ppt" | "pptx" => Ok("/parse-pptx"),
        _ => Err(PipelineError::UnsupportedFileType(file_name.to_string())),
    }
}

/// Nombre del archivo sin su extensión; es el título del set nuevo.
pub fn title_from_file_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn api_base() -> String {
    std::env::var("STUDYME_API_BASE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

#[cfg(target_arch = "wasm32")]
pub fn api_base() -> String {
    // Prioridad: variable de build, luego localStorage, luego mismo origen.
    if let Some(base) = option_env!("STUDYME_API_BASE").filter(|s| !s.trim().is_empty()) {
        return base.trim().to_string();
    }

    let from_storage = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item("studyme_api_base").ok().flatten())
        .filter(|s| !s.trim().is_empty());

    from_storage.unwrap_or_default()
}

fn detail_or(body: &str, fallback: String) -> String {
    match serde_json::from_str::<ApiError>(body) {
        Ok(err) => err.detail,
        Err(_) if body.trim().is_empty() => fallback,
        Err(_) => format!("{fallback}. Body: {}", body.trim()),
    }
}

/// Materializa el borrador como set nuevo: título a partir del nombre del
/// archivo y un MCQ sintético de 4 opciones por tarjeta, con la respuesta
/// real como opción 1 y distractores de relleno. La generación de
/// distractores reales queda fuera de alcance (ver DESIGN.md).
pub fn materialize_set(draft: &GeneratedDraft) -> NewFlashcardSet {
    let description = if draft.summary.trim().is_empty() {
        format!("Flashcards: {} tarjetas", draft.cards.len())
    } else {
        let corto: String = draft.summary.chars().take(100).collect();
        format!("Resumen: {corto}...")
    };

    let flashcards = draft
        .cards
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            let mut options = vec![McqOption {
                id: format!("opt-1-{i}"),
                text: pair.answer.clone(),
                is_correct: true,
            }];
            for n in 2..=4 {
                options.push(McqOption {
                    id: format!("opt-{n}-{i}"),
                    text: format!("Opción incorrecta {}", n - 1),
                    is_correct: false,
                });
            }
            Flashcard {
                id: format!("card-{}", i + 1),
                question: pair.question.clone(),
                answer: pair.answer.clone(),
                mcq_options: Some(options),
            }
        })
        .collect();

    NewFlashcardSet {
        title: title_from_file_name(&draft.file_name),
        description,
        summary: if draft.summary.trim().is_empty() {
            None
        } else {
            Some(draft.summary.clone())
        },
        flashcards,
    }
}

// ---------------------------------------------------------------------------
// Transporte nativo: reqwest bloqueante, pensado para correr en un hilo aparte.
// ---------------------------------------------------------------------------

#[cfg(not(target_arch = "wasm32"))]
fn upload_file(base: &str, file_name: &str, bytes: Vec<u8>) -> Result<String, PipelineError> {
    let path = endpoint_path_for(file_name)?;

    let part = reqwest::blocking::multipart::Part::bytes(bytes).file_name(file_name.to_string());
    let form = reqwest::blocking::multipart::Form::new().part("file", part);

    let client = reqwest::blocking::Client::new();
    let response = client
        .post(format!("{base}{path}"))
        .multipart(form)
        .send()
        .map_err(|e| PipelineError::UploadFailed(format!("error de conexión: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        return Err(PipelineError::UploadFailed(detail_or(
            &body,
            format!("HTTP {status}"),
        )));
    }

    let data: UploadResponse = response
        .json()
        .map_err(|e| PipelineError::UploadFailed(format!("respuesta JSON inválida: {e}")))?;
    Ok(data.text)
}

#[cfg(not(target_arch = "wasm32"))]
fn process_text(
    base: &str,
    text: &str,
    mode: SummaryMode,
) -> Result<ProcessResponse, PipelineError> {
    let client = reqwest::blocking::Client::new();
    let response = client
        .post(format!("{base}/process"))
        .json(&ProcessRequest {
            text,
            mode: mode.as_str(),
        })
        .send()
        .map_err(|e| PipelineError::ProcessingFailed(format!("error de conexión: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        return Err(PipelineError::ProcessingFailed(detail_or(
            &body,
            format!("HTTP {status}"),
        )));
    }

    response
        .json()
        .map_err(|e| PipelineError::ProcessingFailed(format!("respuesta JSON inválida: {e}")))
}

/// Pipeline completo, secuencial: subir → extraer → procesar. Bloquea, así
/// que nunca debe llamarse desde el hilo de la UI.
#[cfg(not(target_arch = "wasm32"))]
pub fn run_pipeline(
    file_name: &str,
    bytes: Vec<u8>,
    mode: SummaryMode,
) -> Result<GeneratedDraft, PipelineError> {
    let base = api_base();
    let text = upload_file(&base, file_name, bytes)?;
    let result = process_text(&base, &text, mode)?;

    Ok(GeneratedDraft {
        file_name: file_name.to_string(),
        mode,
        summary: result.summary,
        explanation: result.explanation,
        cards: result.flashcards.unwrap_or_default().cards,
    })
}

// ---------------------------------------------------------------------------
// Transporte wasm: fetch del navegador vía web_sys.
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
async fn fetch_body(
    url: &str,
    opts: &web_sys::RequestInit,
) -> Result<(bool, u16, String), String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let request = web_sys::Request::new_with_str_and_init(url, opts)
        .map_err(|e| format!("no se pudo crear el request: {e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no existe window".to_string())?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch falló: {e:?}"))?;

    let response: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| "la respuesta fetch no es un Response válido".to_string())?;

    let text_promise = response
        .text()
        .map_err(|e| format!("no se pudo leer el body: {e:?}"))?;
    let text = JsFuture::from(text_promise)
        .await
        .ok()
        .and_then(|v| v.as_string())
        .ok_or_else(|| "no se pudo leer el body".to_string())?;

    Ok((response.ok(), response.status(), text))
}

#[cfg(target_arch = "wasm32")]
async fn upload_file(base: &str, file_name: &str, bytes: Vec<u8>) -> Result<String, PipelineError> {
    let path = endpoint_path_for(file_name)?;

    let form = web_sys::FormData::new()
        .map_err(|_| PipelineError::UploadFailed("no se pudo crear FormData".into()))?;
    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let parts = js_sys::Array::of1(&array);
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts)
        .map_err(|_| PipelineError::UploadFailed("no se pudo crear el blob".into()))?;
    form.append_with_blob_and_filename("file", &blob, file_name)
        .map_err(|_| PipelineError::UploadFailed("no se pudo montar el formulario".into()))?;

    let opts = web_sys::RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(web_sys::RequestMode::Cors);
    opts.set_body(&form);

    let (ok, status, body) = fetch_body(&format!("{base}{path}"), &opts)
        .await
        .map_err(PipelineError::UploadFailed)?;

    if !ok {
        return Err(PipelineError::UploadFailed(detail_or(
            &body,
            format!("HTTP {status}"),
        )));
    }

    serde_json::from_str::<UploadResponse>(&body)
        .map(|data| data.text)
        .map_err(|e| PipelineError::UploadFailed(format!("respuesta JSON inválida: {e}")))
}

#[cfg(target_arch = "wasm32")]
async fn process_text(
    base: &str,
    text: &str,
    mode: SummaryMode,
) -> Result<ProcessResponse, PipelineError> {
    use wasm_bindgen::JsValue;

    let payload = serde_json::to_string(&ProcessRequest {
        text,
        mode: mode.as_str(),
    })
    .map_err(|e| PipelineError::ProcessingFailed(format!("no se pudo serializar: {e}")))?;

    let opts = web_sys::RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(web_sys::RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&payload));

    let url = format!("{base}/process");
    let request = web_sys::Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| PipelineError::ProcessingFailed(format!("no se pudo crear el request: {e:?}")))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| PipelineError::ProcessingFailed(format!("no se pudieron fijar headers: {e:?}")))?;

    // Repite el fetch a mano porque el request ya lleva headers propios.
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window()
        .ok_or_else(|| PipelineError::ProcessingFailed("no existe window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| PipelineError::ProcessingFailed(format!("fetch falló: {e:?}")))?;
    let response: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| PipelineError::ProcessingFailed("respuesta fetch inválida".into()))?;

    let text_promise = response
        .text()
        .map_err(|e| PipelineError::ProcessingFailed(format!("no se pudo leer el body: {e:?}")))?;
    let body = JsFuture::from(text_promise)
        .await
        .ok()
        .and_then(|v| v.as_string())
        .ok_or_else(|| PipelineError::ProcessingFailed("no se pudo leer el body".into()))?;

    if !response.ok() {
        return Err(PipelineError::ProcessingFailed(detail_or(
            &body,
            format!("HTTP {}", response.status()),
        )));
    }

    serde_json::from_str(&body)
        .map_err(|e| PipelineError::ProcessingFailed(format!("respuesta JSON inválida: {e}")))
}

#[cfg(target_arch = "wasm32")]
pub async fn run_pipeline(
    file_name: &str,
    bytes: Vec<u8>,
    mode: SummaryMode,
) -> Result<GeneratedDraft, PipelineError> {
    let base = api_base();
    let text = upload_file(&base, file_name, bytes).await?;
    let result = process_text(&base, &text, mode).await?;

    Ok(GeneratedDraft {
        file_name: file_name.to_string(),
        mode,
        summary: result.summary,
        explanation: result.explanation,
        cards: result.flashcards.unwrap_or_default().cards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_path_follows_the_extension() {
        assert_eq!(endpoint_path_for("apuntes.pdf").unwrap(), "/parse-pdf");
        assert_eq!(endpoint_path_for("apuntes.PDF").unwrap(), "/parse-pdf");
        assert_eq!(endpoint_path_for("tema1.doc").unwrap(), "/parse-docx");
        assert_eq!(endpoint_path_for("tema1.docx").unwrap(), "/parse-docx");
        assert_eq!(endpoint_path_for("clase.ppt").unwrap(), "/parse-pptx");
        assert_eq!(endpoint_path_for("clase.pptx").unwrap(), "/parse-pptx");
    }

    #[test]
    fn unsupported_extension_fails_locally() {
        let err = endpoint_path_for("notas.txt").unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnsupportedFileType("notas.txt".to_string())
        );

        assert!(endpoint_path_for("sin_extension").is_err());
    }

    #[test]
    fn title_strips_only_the_last_extension() {
        assert_eq!(title_from_file_name("apuntes.pdf"), "apuntes");
        assert_eq!(title_from_file_name("tema.1.docx"), "tema.1");
        assert_eq!(title_from_file_name("sin_extension"), "sin_extension");
    }

    #[test]
    fn process_response_accepts_capitalized_keys() {
        let raw = r#"{
            "summary": "S",
            "flashcards": { "Cards": [ { "Question": "Q1", "answer": "A1" } ] }
        }"#;
        let resp: ProcessResponse = serde_json::from_str(raw).unwrap();
        let cards = resp.flashcards.unwrap().cards;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "Q1");
        assert_eq!(cards[0].answer, "A1");
    }

    #[test]
    fn materialize_builds_synthetic_mcq_options() {
        let draft = GeneratedDraft {
            file_name: "apuntes.pdf".to_string(),
            mode: SummaryMode::Brief,
            summary: "S".to_string(),
            explanation: None,
            cards: vec![QaPair {
                question: "Q1".to_string(),
                answer: "A1".to_string(),
            }],
        };

        let set = materialize_set(&draft);
        assert_eq!(set.title, "apuntes");
        assert_eq!(set.summary.as_deref(), Some("S"));
        assert_eq!(set.flashcards.len(), 1);

        let card = &set.flashcards[0];
        assert_eq!(card.id, "card-1");
        let options = card.mcq_options.as_deref().unwrap();
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].text, "A1");
        assert!(options[0].is_correct);
        assert!(options[1..].iter().all(|o| !o.is_correct));
    }

    #[test]
    fn description_falls_back_to_card_count() {
        let draft = GeneratedDraft {
            file_name: "apuntes.pdf".to_string(),
            mode: SummaryMode::Detailed,
            summary: String::new(),
            explanation: None,
            cards: vec![
                QaPair {
                    question: "Q1".to_string(),
                    answer: "A1".to_string(),
                },
                QaPair {
                    question: "Q2".to_string(),
                    answer: "A2".to_string(),
                },
            ],
        };

        let set = materialize_set(&draft);
        assert_eq!(set.description, "Flashcards: 2 tarjetas");
        assert_eq!(set.summary, None);
    }

    #[test]
    fn whitespace_only_summary_counts_as_missing() {
        let draft = GeneratedDraft {
            file_name: "apuntes.pdf".to_string(),
            mode: SummaryMode::Brief,
            summary: "   ".to_string(),
            explanation: None,
            cards: vec![QaPair {
                question: "Q1".to_string(),
                answer: "A1".to_string(),
            }],
        };

        let set = materialize_set(&draft);
        assert_eq!(set.description, "Flashcards: 1 tarjetas");
        assert_eq!(set.summary, None);
    }

    #[test]
    fn error_body_detail_is_surfaced() {
        let body = r#"{"detail": "El PDF está corrupto"}"#;
        assert_eq!(
            detail_or(body, "HTTP 422".to_string()),
            "El PDF está corrupto"
        );
    }

    #[test]
    fn empty_error_body_falls_back_to_the_status() {
        assert_eq!(detail_or("", "HTTP 500".to_string()), "HTTP 500");
        assert_eq!(detail_or("  \n", "HTTP 500".to_string()), "HTTP 500");
    }

    #[test]
    fn non_json_error_body_is_appended_to_the_status() {
        assert_eq!(
            detail_or("Internal Server Error\n", "HTTP 500".to_string()),
            "HTTP 500. Body: Internal Server Error"
        );
    }

    #[test]
    fn long_summary_is_truncated_in_description() {
        let draft = GeneratedDraft {
            file_name: "apuntes.pdf".to_string(),
            mode: SummaryMode::Brief,
            summary: "x".repeat(300),
            explanation: None,
            cards: vec![],
        };

        let set = materialize_set(&draft);
        assert!(set.description.starts_with("Resumen: "));
        assert!(set.description.len() < 300);
    }
}
