//! Basic usage example
//!
//! Minimal usage: `let digest = ascon_suite::xof::hash(&data);`

fn main() {
    let data = b"Hello, World!";
    let digest = ascon_suite::xof::hash(data);

    println!("Data: {:?}", String::from_utf8_lossy(data));
    println!("Hash: {}", hex::encode(digest));

    let key = [0x42u8; 16];
    let nonce = [0u8; 16];
    let ad = b"example associated data";
    let mut buffer = *data;

    let mut enc = ascon_suite::aead::AeadState::<ascon_suite::aead::Ascon128>::init(&key, nonce);
    enc.start(ad);
    enc.encrypt_block(&mut buffer);
    let tag = enc.encrypt_finalize();

    println!("Ciphertext: {}", hex::encode(buffer));
    println!("Tag: {}", hex::encode(tag));

    let mut dec = ascon_suite::aead::AeadState::<ascon_suite::aead::Ascon128>::init(&key, nonce);
    dec.start(ad);
    dec.decrypt_block(&mut buffer);
    dec.decrypt_finalize(&mut buffer, &tag)
        .expect("tag must verify since nothing was tampered with");

    println!("Recovered: {:?}", String::from_utf8_lossy(&buffer));
}
