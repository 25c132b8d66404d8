//! Offline demo analyzer. Implements `AnalyzePort` without a server.
//!
//! Keyword classification into the server's categories; replies with the same JSON
//! contract so the rest of the page cannot tell the difference.

use crate::domain::{DomainError, HttpReply, SelectedInput};
use crate::ports::AnalyzePort;
use chrono::Local;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

struct Category {
    code: &'static str,
    name: &'static str,
    emoji: &'static str,
    priority: &'static str,
    department: &'static str,
    keywords: &'static [&'static str],
    confidence: f64,
    signature: &'static str,
}

/// Checked in order; ROTINA is the catch-all.
const CATEGORIES: &[Category] = &[
    Category {
        code: "PHISHING",
        name: "Phishing",
        emoji: "🚫",
        priority: "CRÍTICA",
        department: "Segurança",
        keywords: &["confirme sua senha", "verifique sua conta", "conta bloqueada"],
        confidence: 0.85,
        signature: "Segurança",
    },
    Category {
        code: "CURRICULO",
        name: "Currículo",
        emoji: "📄",
        priority: "ALTA",
        department: "RH",
        keywords: &["currículo", "curriculo", "vaga", "candidatura"],
        confidence: 0.85,
        signature: "RH",
    },
    Category {
        code: "EDUCACIONAL",
        name: "Educacional",
        emoji: "🎓",
        priority: "ALTA",
        department: "Educação",
        keywords: &["matricula", "matrícula", "curso", "universidade"],
        confidence: 0.80,
        signature: "Secretaria Acadêmica",
    },
    Category {
        code: "FINANCEIRO",
        name: "Financeiro",
        emoji: "💰",
        priority: "ALTA",
        department: "Financeiro",
        keywords: &["nota fiscal", "boleto", "pagamento"],
        confidence: 0.80,
        signature: "Financeiro",
    },
    Category {
        code: "IMPORTANTE",
        name: "Importante",
        emoji: "⭐",
        priority: "ALTA",
        department: "Diretoria",
        keywords: &["urgente", "importante", "contrato"],
        confidence: 0.75,
        signature: "Diretoria",
    },
    Category {
        code: "PROFISSIONAL",
        name: "Profissional",
        emoji: "💼",
        priority: "MÉDIA",
        department: "Comercial",
        keywords: &["proposta", "orçamento", "serviço"],
        confidence: 0.65,
        signature: "Comercial",
    },
    Category {
        code: "SPAM",
        name: "Spam",
        emoji: "📢",
        priority: "BAIXA",
        department: "Filtragem",
        keywords: &["promoção", "grátis", "clique aqui", "oferta imperdível"],
        confidence: 0.70,
        signature: "Atendimento",
    },
];

const ROUTINE: Category = Category {
    code: "ROTINA",
    name: "Rotina",
    emoji: "📋",
    priority: "BAIXA",
    department: "Atendimento",
    keywords: &[],
    confidence: 0.50,
    signature: "Atendimento",
};

/// Needs action when the category implies follow-up work.
const ACTION_CATEGORIES: [&str; 4] = ["CURRICULO", "FINANCEIRO", "IMPORTANTE", "EDUCACIONAL"];

fn classify(content: &str) -> &'static Category {
    let lower = content.to_lowercase();
    CATEGORIES
        .iter()
        .find(|c| c.keywords.iter().any(|k| lower.contains(k)))
        .unwrap_or(&ROUTINE)
}

/// Pseudo-random 5-digit protocol suffix; uniqueness is not required.
fn protocol_number() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    10_000 + nanos % 90_000
}

/// Demo adapter with simulated latency, mirroring the server's demo mode.
pub struct DemoAnalyzer {
    delay_ms: u64,
}

impl DemoAnalyzer {
    pub fn new() -> Self {
        Self { delay_ms: 400 }
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    async fn content(input: &SelectedInput) -> Result<String, DomainError> {
        let mut content = input.text.clone().unwrap_or_default();
        if let Some(file) = &input.file {
            content.push(' ');
            content.push_str(&file.name);
            if file.extension() == "txt" {
                let bytes = file.read_bytes().await?;
                content.push(' ');
                content.push_str(&String::from_utf8_lossy(&bytes));
            }
        }
        Ok(content)
    }
}

impl Default for DemoAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AnalyzePort for DemoAnalyzer {
    async fn analyze(&self, input: &SelectedInput) -> Result<HttpReply, DomainError> {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        if input.is_empty() {
            let body = serde_json::json!({
                "error": "Por favor, insira o texto do email ou selecione um arquivo."
            });
            return Ok(HttpReply {
                status: 400,
                body: body.to_string(),
            });
        }

        let content = Self::content(input).await?;
        let category = classify(&content);
        let protocol = format!("DEMO-{}", protocol_number());
        let date = Local::now().format("%d/%m/%Y");
        let reply = format!(
            "Prezado(a),\n\nConfirmamos recebimento da sua mensagem.\n\nProtocolo: {}\nData: {}\n\nAtenciosamente,\n{}",
            protocol, date, category.signature
        );

        info!(
            category = category.code,
            content_len = content.len(),
            "[DEMO] email classified"
        );

        let body = serde_json::json!({
            "is_useful": category.code != "SPAM",
            "analysis": {
                "categoria": category.code,
                "categoria_nome": category.name,
                "categoria_emoji": category.emoji,
                "utilidade": category.confidence,
                "confianca_ia": category.confidence,
                "resumo": format!("Classificado como {}", category.code),
                "acao_necessaria": ACTION_CATEGORIES.contains(&category.code),
                "prioridade": category.priority,
                "protocolo": protocol,
                "tags": ["demo", category.code.to_lowercase()],
                "departamento": category.department,
                "fonte": "ia_semantica_demo",
            },
            "auto_response": reply,
            "analysis_source": "ia_demo",
        });

        Ok(HttpReply {
            status: 200,
            body: body.to_string(),
        })
    }
}
