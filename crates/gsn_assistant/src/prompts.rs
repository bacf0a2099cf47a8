//! Prompt builders.

use crate::error::{AssistantError, AssistantResult};
use gsn_core::format::format_eur;
use gsn_core::{Proposal, RecordStatus};

/// System instruction describing GOTEC, its portfolio and mail templates.
pub const KNOWLEDGE_BASE: &str = include_str!("knowledge_base.md");

/// Shown in place of a summary when generation fails.
pub const SUMMARY_FALLBACK: &str = "Lamentamos, mas não foi possível gerar um resumo neste momento. \
                                    Por favor, tente novamente mais tarde.";

/// Asks for a short internal summary of a proposal (pt-PT).
pub fn summary_prompt(proposal: &Proposal) -> String {
    format!(
        "Gera um resumo conciso da seguinte proposta de vendas, para uma revisão interna rápida.
Destaca os pontos-chave, de preferência em bullet points.

- **Cliente:** {customer}
- **Oportunidade:** {opportunity}
- **Máquina/Solução:** {machine}
- **Valor Total:** {value}
- **Estado Atual:** {status}
- **Observações:** {observations}

Resume esta informação de forma clara e breve.
",
        customer = proposal.customer_name,
        opportunity = proposal.opportunity,
        machine = proposal.machine,
        value = format_eur(proposal.total_value),
        status = proposal.status.as_str(),
        observations = proposal.observations,
    )
}

/// Splits user input into addresses, one per non-blank line.
pub fn parse_addresses(input: &str) -> Vec<&str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Asks for an optimized visit route through `addresses`.
///
/// Fails with [`AssistantError::NoAddresses`] when there is nothing to visit.
pub fn route_prompt(addresses: &[&str]) -> AssistantResult<String> {
    if addresses.is_empty() {
        return Err(AssistantError::NoAddresses);
    }
    Ok(format!(
        "You are an expert logistics planner for a technical salesperson from GOTEC.
Your task is to create an optimized daily visit route starting from the user's current location.
For each stop, provide a brief summary of the potential business opportunity, suggesting relevant products from the GOTEC portfolio.
The list of addresses to visit is:

{}

Generate a logical itinerary with estimated travel times between stops. The output should be in clear, readable markdown format.
",
        addresses.join("\n")
    ))
}
