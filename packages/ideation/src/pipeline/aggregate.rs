//! Idea aggregation with deterministic backfill.
//!
//! Always returns exactly the requested number of ideas with pairwise
//! distinct keys: generator output first, then topic templates.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::traits::idea_source::IdeaSource;
use crate::types::{
    config::AggregatorConfig,
    idea::{IdeaContext, IdeaKey},
};

type Template = fn(&str) -> IdeaContext;

/// Backfill templates, used in rotation.
const TEMPLATES: [Template; 3] = [applied_intelligence, evidence_observatory, validation_lab];

fn applied_intelligence(topic: &str) -> IdeaContext {
    IdeaContext::new(
        format!("Explorador de Inteligencia Aplicada para {topic}"),
        "Desarrolla una plataforma digital que combine analitica de datos y vigilancia tecnologica para priorizar oportunidades emergentes.",
        "Integra IA generativa con resenas automatizadas de literatura academica regional e internacional.",
        "Equipos de innovacion de startups y universidades con foco en investigacion aplicada.",
    )
    .with_validation_focus([
        "Contrastar hallazgos con bases de datos cientificas (Semantic Scholar, CrossRef).",
        "Entrevistar usuarios objetivo para validar el ajuste problema-solucion.",
    ])
    .with_action_steps([
        "Definir nicho inicial y recopilar dataset de articulos y reportes relevantes.",
        "Prototipar un dashboard IA que priorice ideas segun impacto y viabilidad.",
        "Implementar metricas de adopcion y aprendizaje de usuarios tempranos.",
    ])
    .with_trend_signals([
        "Auge de herramientas AI co-piloto para ideacion.",
        "Demanda de validacion cientifica rapida para propuestas de valor.",
    ])
}

fn evidence_observatory(topic: &str) -> IdeaContext {
    IdeaContext::new(
        format!("Observatorio de Evidencia sobre {topic}"),
        "Construye un observatorio que agregue publicaciones, datos abiertos y senales de mercado para detectar brechas desatendidas.",
        "Cruza literatura cientifica reciente con indicadores regionales para anticipar tendencias.",
        "Analistas de politicas publicas y organizaciones de la sociedad civil.",
    )
    .with_validation_focus([
        "Medir cuantas brechas detectadas confirman los expertos del sector.",
        "Comparar la cobertura del observatorio con fuentes existentes.",
    ])
    .with_action_steps([
        "Mapear fuentes abiertas y academicas relevantes.",
        "Lanzar un piloto con un tablero de indicadores por region.",
    ])
    .with_trend_signals([
        "Crecimiento de datos abiertos gubernamentales.",
        "Mayor exigencia de decisiones basadas en evidencia.",
    ])
}

fn validation_lab(topic: &str) -> IdeaContext {
    IdeaContext::new(
        format!("Laboratorio de Validacion Rapida para {topic}"),
        "Ofrece un servicio que convierte hipotesis de negocio en experimentos medibles respaldados por evidencia academica.",
        "Automatiza el diseno de experimentos y la lectura de resultados con asistentes de IA.",
        "Emprendedores en etapa temprana y aceleradoras.",
    )
    .with_validation_focus([
        "Verificar que los experimentos reducen el tiempo de validacion.",
        "Confirmar disposicion a pagar en un grupo piloto.",
    ])
    .with_action_steps([
        "Definir plantillas de experimentos por tipo de hipotesis.",
        "Prototipar el asistente y probarlo con cinco equipos.",
        "Publicar casos de exito con metricas antes y despues.",
    ])
    .with_trend_signals([
        "Adopcion de metodologias lean en ecosistemas regionales.",
        "Acceso creciente a modelos de lenguaje de bajo costo.",
    ])
}

/// Template idea for a topic, made unique against `seen` with a version suffix.
fn backfill_idea(template: Template, topic: &str, seen: &HashSet<IdeaKey>) -> IdeaContext {
    let base = template(topic);
    let mut candidate = base.clone();
    let mut version = 1;
    while seen.contains(&candidate.dedup_key()) {
        version += 1;
        candidate.title = format!("{} v{version}", base.title);
    }
    candidate
}

/// Collect `desired` distinct ideas for a topic.
///
/// Calls the source up to `max_attempts` times; failed calls and
/// unparsable batches count as zero ideas. Whatever is still missing is
/// synthesized from templates.
pub async fn aggregate_ideas<S: IdeaSource + ?Sized>(
    source: &S,
    topic: &str,
    desired: usize,
    config: &AggregatorConfig,
) -> Vec<IdeaContext> {
    let mut ideas: Vec<IdeaContext> = Vec::with_capacity(desired);
    let mut seen: HashSet<IdeaKey> = HashSet::new();

    for attempt in 1..=config.max_attempts {
        if ideas.len() >= desired {
            break;
        }

        let batch = match source.generate(topic).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!(attempt, error = %e, "Idea generation failed");
                continue;
            }
        };

        let before = ideas.len();
        for raw in batch.ideas {
            let idea = IdeaContext::normalize(raw);
            if seen.insert(idea.dedup_key()) {
                ideas.push(idea);
                if ideas.len() >= desired {
                    break;
                }
            }
        }

        debug!(
            attempt,
            new = ideas.len() - before,
            total = ideas.len(),
            "Collected generated ideas"
        );
    }

    let generated = ideas.len();
    for template in TEMPLATES.iter().cycle() {
        if ideas.len() >= desired {
            break;
        }
        let idea = backfill_idea(*template, topic, &seen);
        seen.insert(idea.dedup_key());
        ideas.push(idea);
    }

    if ideas.len() > generated {
        info!(
            generated,
            backfilled = ideas.len() - generated,
            "Backfilled ideas from templates"
        );
    }

    ideas
}
