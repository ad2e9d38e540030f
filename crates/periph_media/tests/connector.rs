use periph_media::{Connection, ConnectorError, LoopbackConnection};

#[test]
fn loopback_delivers_frames_in_order() {
    let mut conn = LoopbackConnection::new();
    assert!(conn.is_connected());

    conn.send(b"frame one").unwrap();
    conn.send(b"frame two").unwrap();

    assert_eq!(conn.receive().unwrap().unwrap(), b"frame one");
    assert_eq!(conn.receive().unwrap().unwrap(), b"frame two");
    assert!(conn.receive().unwrap().is_none());
}

#[test]
fn closed_connection_rejects_traffic() {
    let mut conn = LoopbackConnection::new();
    conn.send(b"pending").unwrap();
    conn.close();

    assert!(!conn.is_connected());
    assert!(matches!(conn.send(b"x"), Err(ConnectorError::Closed)));
    assert!(matches!(conn.receive(), Err(ConnectorError::Closed)));
}
