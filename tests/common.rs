#![allow(dead_code)]
use base64::{engine::general_purpose::STANDARD, Engine};
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

pub const WORKSPACE_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// path of a json fixture below `resources/tests`
pub fn fixture(file_name: &str) -> PathBuf {
    Path::new(WORKSPACE_DIR)
        .join("resources/tests")
        .join(file_name)
}

/// One MAIL FROM .. DATA exchange seen by the mock server.
#[derive(Clone, Debug, Default)]
pub struct Transaction {
    pub mail_from: String,
    pub rcpt_to: Vec<String>,
    pub data: String,
}

/// Everything the mock server has seen so far.
#[derive(Clone, Debug, Default)]
pub struct Observed {
    pub connections: usize,
    /// decoded `AUTH PLAIN` credentials (user, password)
    pub authentications: Vec<(String, String)>,
    pub successful_authentications: usize,
    pub transactions: Vec<Transaction>,
}

struct MockAccount {
    username: String,
    password: String,
    rejected_recipients: Vec<String>,
}

/// Minimal SMTP server for the tests, speaks just enough
/// ESMTP for lettre: EHLO, AUTH PLAIN, MAIL, RCPT, DATA, QUIT.
pub struct MockSmtpServer {
    address: SocketAddr,
    observed: Arc<Mutex<Observed>>,
}

impl MockSmtpServer {
    /// start the server on a random port of 127.0.0.1, it accepts
    /// only the given account and rejects the listed recipients.
    pub fn start(username: &str, password: &str, rejected_recipients: &[&str]) -> MockSmtpServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("cannot bind mock smtp server");
        let address = listener.local_addr().expect("mock smtp server has no address");
        let observed = Arc::new(Mutex::new(Observed::default()));
        let account = Arc::new(MockAccount {
            username: username.to_string(),
            password: password.to_string(),
            rejected_recipients: rejected_recipients.iter().map(|r| r.to_string()).collect(),
        });
        let thread_observed = observed.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                thread_observed.lock().unwrap().connections += 1;
                let session_observed = thread_observed.clone();
                let session_account = account.clone();
                thread::spawn(move || {
                    let _ = handle_session(stream, &session_account, &session_observed);
                });
            }
        });
        MockSmtpServer { address, observed }
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn observed(&self) -> Observed {
        self.observed.lock().unwrap().clone()
    }
}

/// get a port on 127.0.0.1 where nobody listens
pub fn unused_local_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("cannot bind probe listener");
    listener.local_addr().unwrap().port()
}

/// the address between `<` and `>` of MAIL FROM or RCPT TO
fn extract_path(command: &str) -> String {
    match (command.find('<'), command.find('>')) {
        (Some(start), Some(end)) if start < end => command[start + 1..end].to_string(),
        _ => String::new(),
    }
}

fn handle_session(
    stream: TcpStream,
    account: &MockAccount,
    observed: &Mutex<Observed>,
) -> std::io::Result<()> {
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);
    writer.write_all(b"220 mock.local ESMTP ready\r\n")?;
    let mut authenticated = false;
    let mut transaction: Option<Transaction> = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let command = line.trim_end_matches(['\r', '\n']);
        let upper = command.to_ascii_uppercase();
        if upper.starts_with("EHLO") {
            writer.write_all(b"250-mock.local\r\n250 AUTH PLAIN LOGIN\r\n")?;
        } else if upper.starts_with("HELO") {
            writer.write_all(b"250 mock.local\r\n")?;
        } else if upper.starts_with("AUTH PLAIN") {
            let decoded = STANDARD
                .decode(command["AUTH PLAIN".len()..].trim())
                .unwrap_or_default();
            // authzid \0 authcid \0 password
            let parts: Vec<String> = decoded
                .split(|b| *b == 0)
                .map(|p| String::from_utf8_lossy(p).into_owned())
                .collect();
            let user = parts.get(1).cloned().unwrap_or_default();
            let password = parts.get(2).cloned().unwrap_or_default();
            let accepted = user == account.username && password == account.password;
            {
                let mut observed = observed.lock().unwrap();
                observed.authentications.push((user, password));
                if accepted {
                    observed.successful_authentications += 1;
                }
            }
            if accepted {
                authenticated = true;
                writer.write_all(b"235 2.7.0 Authentication successful\r\n")?;
            } else {
                writer.write_all(b"535 5.7.8 Authentication credentials invalid\r\n")?;
            }
        } else if upper.starts_with("MAIL FROM:") {
            if authenticated {
                transaction = Some(Transaction {
                    mail_from: extract_path(command),
                    ..Default::default()
                });
                writer.write_all(b"250 2.1.0 Ok\r\n")?;
            } else {
                writer.write_all(b"530 5.7.0 Authentication required\r\n")?;
            }
        } else if upper.starts_with("RCPT TO:") {
            let recipient = extract_path(command);
            match transaction.as_mut() {
                Some(_) if account.rejected_recipients.contains(&recipient) => {
                    writer.write_all(b"550 5.1.1 Recipient rejected\r\n")?;
                }
                Some(t) => {
                    t.rcpt_to.push(recipient);
                    writer.write_all(b"250 2.1.5 Ok\r\n")?;
                }
                None => writer.write_all(b"503 5.5.1 Need MAIL first\r\n")?,
            }
        } else if upper == "DATA" {
            let Some(mut t) = transaction.take() else {
                writer.write_all(b"503 5.5.1 Need MAIL first\r\n")?;
                continue;
            };
            writer.write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n")?;
            loop {
                let mut data_line = String::new();
                if reader.read_line(&mut data_line)? == 0 {
                    return Ok(());
                }
                if data_line == ".\r\n" {
                    break;
                }
                let unstuffed = data_line.strip_prefix('.').unwrap_or(&data_line);
                t.data.push_str(unstuffed);
            }
            observed.lock().unwrap().transactions.push(t);
            writer.write_all(b"250 2.0.0 Ok: queued\r\n")?;
        } else if upper == "QUIT" {
            writer.write_all(b"221 2.0.0 Bye\r\n")?;
            return Ok(());
        } else if upper == "RSET" {
            transaction = None;
            writer.write_all(b"250 2.0.0 Ok\r\n")?;
        } else if upper == "NOOP" {
            writer.write_all(b"250 2.0.0 Ok\r\n")?;
        } else {
            writer.write_all(b"502 5.5.2 Command not recognized\r\n")?;
        }
    }
}
