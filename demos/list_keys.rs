use std::env;

use s3_spaces::{Client, ListQuery, api};

#[allow(clippy::result_large_err)]
#[tokio::main]
async fn main() -> Result<(), s3_spaces::Error> {
    let mut args = env::args().skip(1);
    let (Some(path), Some(account_name), Some(bucket)) = (args.next(), args.next(), args.next())
    else {
        eprintln!("usage: list_keys <accounts.json> <account> <bucket>");
        return Ok(());
    };

    let json = match std::fs::read_to_string(&path) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            return Ok(());
        }
    };
    let accounts = s3_spaces::decode_accounts(&json)?;
    let Some(account) = s3_spaces::find_account(&accounts, &account_name) else {
        eprintln!("no account named {account_name} in {path}");
        return Ok(());
    };

    let client = Client::new()?;

    let mut marker: Option<String> = None;
    let mut pages = 0u32;
    loop {
        let mut query = vec![ListQuery::MaxKeys(1000)];
        if let Some(m) = &marker {
            query.push(ListQuery::Marker(m.clone()));
        }

        let page = client.send(account, api::list_keys(&bucket, &query)).await?;
        pages += 1;
        for key in &page.keys {
            println!("{} ({} bytes)", key.key, key.size);
        }

        if !page.is_truncated || pages >= 3 {
            break;
        }
        marker = page
            .next_marker
            .clone()
            .or_else(|| page.keys.last().map(|k| k.key.clone()));
        if marker.is_none() {
            break;
        }
    }

    Ok(())
}
