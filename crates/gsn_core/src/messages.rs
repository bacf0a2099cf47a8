//! User-facing notification texts (pt-PT).

use crate::diff::DiffResult;
use crate::format::format_datetime_pt;
use crate::record::{Record, RecordKind};
use chrono::{DateTime, Local};

/// Shown when a sync starts.
pub const SYNC_STARTED: &str = "Sincronização iniciada...";

/// Shown when a sync finds nothing to change.
pub const SYNC_NO_CHANGES: &str = "Sincronização concluída. Sem alterações.";

/// Last-sync label before the first sync.
pub const NEVER_SYNCED: &str = "Nunca sincronizado.";

/// Summary of a completed sync.
///
/// Only non-zero categories are listed.
pub fn sync_finished(changes: &DiffResult) -> String {
    match changes.change_list() {
        Some(list) => format!("Sincronização concluída: {list}."),
        None => SYNC_NO_CHANGES.to_string(),
    }
}

/// Notification for a failed sync.
pub fn sync_failed(reason: &str) -> String {
    format!("Falha na sincronização: {reason}")
}

/// Question asked before a sync replaces local data.
pub fn sync_confirmation(kind: RecordKind) -> String {
    let what = match kind {
        RecordKind::Customer => "dos clientes",
        RecordKind::Machine => "das máquinas instaladas",
        RecordKind::Proposal => "das propostas",
    };
    format!(
        "Tem a certeza que deseja sincronizar os dados {what}? \
         Esta ação irá buscar os dados mais recentes e atualizar a sua lista local."
    )
}

/// Label describing the last completed sync.
pub fn last_sync_label(at: Option<&DateTime<Local>>) -> String {
    match at {
        Some(at) => format!("Última sinc: {}", format_datetime_pt(at)),
        None => NEVER_SYNCED.to_string(),
    }
}

/// Confirmation after an edit session is saved.
pub fn record_updated<R: Record>(record: &R) -> String {
    let name = record.display_name();
    match R::KIND {
        RecordKind::Customer => format!("Empresa \"{name}\" atualizada com sucesso."),
        RecordKind::Machine => format!("Máquina \"{name}\" atualizada com sucesso."),
        RecordKind::Proposal => format!("Proposta \"{name}\" atualizada."),
    }
}

/// Confirmation after a proposal is created.
pub fn proposal_created(opportunity: &str) -> String {
    format!("Proposta \"{opportunity}\" criada como rascunho.")
}

/// Confirmation after a proposal changes status.
pub fn status_changed(status: &str) -> String {
    format!("Proposta marcada como \"{status}\".")
}

/// Shown when an export is requested over an empty list.
pub fn nothing_to_export(kind: RecordKind) -> String {
    match kind {
        RecordKind::Customer => "Nenhuma empresa para exportar.".to_string(),
        RecordKind::Machine => "Nenhuma máquina para exportar.".to_string(),
        RecordKind::Proposal => "Nenhuma proposta para exportar.".to_string(),
    }
}

/// Confirmation after a CSV file is written.
pub const CSV_EXPORTED: &str = "Exportação CSV iniciada.";

/// Confirmation after a printable report is written.
pub const REPORT_EXPORTED: &str = "A preparar a impressão do PDF.";

/// Shown when a proposal summary could not be generated.
pub const SUMMARY_FAILED: &str = "Erro ao gerar resumo.";

/// Confirmation after a mail draft is built.
pub fn mail_opened(id: &str) -> String {
    format!("A abrir o cliente de email para a proposta {id}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_summary_lists_non_zero_counts() {
        let changes = DiffResult {
            added: 2,
            updated: 0,
            removed: 1,
        };
        let text = sync_finished(&changes);
        assert_eq!(text, "Sincronização concluída: 2 adicionada(s), 1 removida(s).");
        assert!(!text.contains("atualizada(s)"));
        assert_eq!(sync_finished(&DiffResult::default()), SYNC_NO_CHANGES);
    }

    #[test]
    fn confirmation_names_the_list() {
        assert!(sync_confirmation(RecordKind::Machine).contains("das máquinas instaladas?"));
    }

    #[test]
    fn last_sync_label_before_first_sync() {
        assert_eq!(last_sync_label(None), "Nunca sincronizado.");
    }

    #[test]
    fn export_messages() {
        assert_eq!(
            nothing_to_export(RecordKind::Proposal),
            "Nenhuma proposta para exportar."
        );
        assert_eq!(status_changed("Accepted"), "Proposta marcada como \"Accepted\".");
    }
}
