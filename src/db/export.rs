use std::path::Path;

use crate::error::LinkerResult;
use crate::service::ReconcileRow;

/// 导出对账结果到 CSV 文件
pub fn export_outcomes_csv(rows: &[ReconcileRow], output_path: &Path) -> LinkerResult<()> {
    use csv::Writer;
    use std::fs::File;

    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "payment_id",
        "success",
        "suggested_contract_id",
        "contract_number",
        "confidence",
        "recommendation",
        "reason",
        "linked",
    ])?;

    for row in rows {
        let best = row.outcome.best();
        writer.write_record(&[
            row.payment_id.to_string(),
            row.outcome.success.to_string(),
            row.outcome
                .suggested_contract_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            best.map(|b| b.contract_number.clone()).unwrap_or_default(),
            format!("{:.2}", row.outcome.confidence),
            format!("{:?}", row.outcome.recommendation),
            best.map(|b| b.reason.clone()).unwrap_or_default(),
            row.linked.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
