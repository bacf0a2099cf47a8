//! `mailto:` links presenting a proposal to its customer.

use crate::format::format_eur;
use crate::record::{Customer, Proposal};

/// Public page of a proposal.
pub const PROPOSAL_LINK_BASE: &str = "https://www.gotec.pt/proposals/view/";

/// Signature appended to outgoing mail.
pub const SIGNATURE: &str = "---
GOTEC — Transferência Tecnológica

João Chanoca
Mobile: +351 910 929 257
E-mail: joao.chanoca@gotec.pt
Site: http://www.gotec.pt
";

/// A composed message, before encoding into a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    /// Recipient address; empty when the customer is unknown.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl MailDraft {
    /// Encodes the draft as a `mailto:` URI.
    pub fn to_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            encode_uri_component(&self.subject),
            encode_uri_component(&self.body)
        )
    }
}

/// Composes the message presenting `proposal`.
///
/// The recipient is the e-mail of the customer whose name matches the
/// proposal's customer name exactly.
pub fn proposal_mailto(proposal: &Proposal, customers: &[Customer]) -> MailDraft {
    let recipient = customers
        .iter()
        .find(|c| c.name == proposal.customer_name)
        .map(|c| c.email.clone())
        .unwrap_or_default();

    let body = format!(
        "Caro(a) {customer},

Na sequência da nossa conversa, envio os detalhes da nossa proposta.

ID da Proposta: {id}
Oportunidade: {opportunity}
Máquina/Solução: {machine}
Valor Total: {value}

Pode consultar a proposta completa online aqui:
{PROPOSAL_LINK_BASE}{id}

Estamos à sua inteira disposição para qualquer esclarecimento.

Com os melhores cumprimentos,

{SIGNATURE}",
        customer = proposal.customer_name,
        id = proposal.id,
        opportunity = proposal.opportunity,
        machine = proposal.machine,
        value = format_eur(proposal.total_value),
    );

    MailDraft {
        recipient,
        subject: format!("Proposta GOTEC: {} ({})", proposal.opportunity, proposal.id),
        body,
    }
}

/// Percent-encodes UTF-8 text, leaving `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
/// untouched.
pub fn encode_uri_component(value: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(char::from(byte)),
            _ => {
                out.push('%');
                out.push(char::from(HEX[usize::from(byte >> 4)]));
                out.push(char::from(HEX[usize::from(byte & 0x0f)]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ContactPerson, CustomerStatus, ProposalStatus};

    fn proposal(customer: &str) -> Proposal {
        Proposal {
            id: "PROP-2024-002".into(),
            date: "2024-05-20".into(),
            opportunity: "Upgrade de injetora CHEN HSONG".into(),
            customer_name: customer.into(),
            observations: String::new(),
            delivery_deadline: "2024-07-15".into(),
            status: ProposalStatus::Accepted,
            machine: "CHEN HSONG JM268-MK6".into(),
            total_value: 85000.0,
            salesperson: "João Chanoca".into(),
        }
    }

    fn injetec() -> Customer {
        Customer {
            id: "CUST-002".into(),
            name: "Injetec".into(),
            contact_people: vec![ContactPerson::new("Sofia Costa", "Compras")],
            country: "Portugal".into(),
            email: "sofia.c@injetec.pt".into(),
            phone: String::new(),
            salesperson: "João Chanoca".into(),
            status: CustomerStatus::Active,
        }
    }

    #[test]
    fn draft_contents() {
        let draft = proposal_mailto(&proposal("Injetec"), &[injetec()]);
        assert_eq!(draft.recipient, "sofia.c@injetec.pt");
        assert_eq!(
            draft.subject,
            "Proposta GOTEC: Upgrade de injetora CHEN HSONG (PROP-2024-002)"
        );
        assert!(draft.body.starts_with("Caro(a) Injetec,\n"));
        assert!(draft.body.contains("Valor Total: 85\u{a0}000,00\u{a0}€"));
        assert!(draft
            .body
            .contains("https://www.gotec.pt/proposals/view/PROP-2024-002"));
        assert!(draft.body.ends_with("Site: http://www.gotec.pt\n"));
    }

    #[test]
    fn unknown_customer_leaves_recipient_empty() {
        let draft = proposal_mailto(&proposal("Desconhecida"), &[injetec()]);
        assert!(draft.to_uri().starts_with("mailto:?subject=Proposta%20GOTEC%3A%20"));
    }

    #[test]
    fn encodes_like_uri_components() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("Máquina (nova)!"), "M%C3%A1quina%20(nova)!");
        assert_eq!(encode_uri_component("linha\n"), "linha%0A");
    }
}
